//! Application window
//!
//! One small egui panel: interval input, start button, colored status
//! line, a countdown bar that is only visible while running, and a help
//! line. Any click inside the window while running stops the loop, so the
//! whole surface doubles as the stop control.

use crate::constants::{DEFAULT_INTERVAL_SECONDS, REPAINT_INTERVAL_MS};
use crate::control::Controller;
use eframe::egui;
use std::time::Duration;

/// Blocking notice shown over the window until dismissed.
struct Notice {
    title: &'static str,
    message: String,
}

pub struct JiggleApp {
    controller: Controller,
    interval_text: String,
    /// Pending blocking notice (invalid input or a pointer fault).
    notice: Option<Notice>,
}

impl JiggleApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut controller = Controller::new();

        // Worker events arrive between frames; have each one schedule a
        // repaint so the countdown never waits on the next input event.
        let ctx = cc.egui_ctx.clone();
        controller.set_waker(move || ctx.request_repaint());

        Self {
            controller,
            interval_text: DEFAULT_INTERVAL_SECONDS.to_string(),
            notice: None,
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let title = notice.title;
        let message = notice.message.clone();

        let modal = egui::Modal::new(egui::Id::new("jiggle_notice")).show(ctx, |ui| {
            ui.set_width(240.0);
            ui.heading(title);
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                self.notice = None;
            }
        });
        if modal.should_close() {
            self.notice = None;
        }
    }
}

impl eframe::App for JiggleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.pump_events();
        if let Some(fault) = self.controller.take_fault() {
            self.notice = Some(Notice {
                title: "Pointer failure",
                message: fault,
            });
        }

        // Clicks on disabled widgets land here too, so any click in the
        // window stops the loop.
        if self.controller.is_running() {
            if ctx.input(|i| i.pointer.any_click()) {
                self.controller.stop();
            } else {
                ctx.request_repaint_after(Duration::from_millis(REPAINT_INTERVAL_MS));
            }
        }
        let running = self.controller.is_running();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Interval (seconds):");
                ui.add_enabled(
                    !running,
                    egui::TextEdit::singleline(&mut self.interval_text).desired_width(60.0),
                );
            });
            ui.add_space(4.0);

            if ui
                .add_enabled(!running, egui::Button::new("Start"))
                .clicked()
            {
                if let Err(e) = self.controller.start(&self.interval_text) {
                    self.notice = Some(Notice {
                        title: "Invalid input",
                        message: e.to_string(),
                    });
                }
            }
            ui.add_space(4.0);

            let (status, color) = if running {
                ("Status: Running", egui::Color32::DARK_GREEN)
            } else {
                ("Status: Stopped", egui::Color32::RED)
            };
            ui.colored_label(color, status);
            ui.add_space(4.0);

            if running {
                if let Some(remaining) = self.controller.countdown() {
                    let total = self.controller.interval().max(1);
                    let text = if self.controller.is_moving() {
                        "Moving...".to_string()
                    } else {
                        format!("{}s", remaining)
                    };
                    ui.add(egui::ProgressBar::new(remaining as f32 / total as f32).text(text));
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.vertical_centered(|ui| {
                ui.label("Click anywhere inside this window to stop.");
            });
        });

        self.show_notice(ctx);
    }
}
