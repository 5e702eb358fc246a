// jiggle - keep idle timeouts at bay by nudging the mouse cursor
// One small window: set an interval, start, click anywhere to stop.

use anyhow::Result;
use jiggle::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use jiggle::ui::JiggleApp;
use log::info;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting jiggle v{}", env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_resizable(false),
        ..Default::default()
    };

    // Blocks until the window is closed; dropping the app cancels any
    // worker still counting down.
    eframe::run_native(
        "Jiggle",
        native_options,
        Box::new(|cc| Ok(Box::new(JiggleApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("window event loop failed: {e}"))?;

    info!("Shutdown complete");
    Ok(())
}
