//! Run/stop controller
//!
//! Owns the lifecycle of the mover loop and the display model the UI
//! renders: running status, the cached countdown value, and the moving
//! indicator. All mutation happens on the UI thread, either directly from
//! user actions or by pumping the worker's event channel.

use crate::mover::{self, DeviceFactory, MoverEvent, MoverHandle, Waker};
use crate::pointer::{Pointer, SystemPointer};
use log::{debug, error, info};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use thiserror::Error;

/// The interval text could not be read as a positive whole number of
/// seconds. Surfaced to the user as a blocking notice; no state changes.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a positive whole number of seconds: {input:?}")]
pub struct InvalidIntervalError {
    pub input: String,
}

/// Parse user-entered interval text. Anything that is not a positive
/// integer is rejected, including zero, negatives, and trailing junk.
pub fn parse_interval(text: &str) -> Result<u64, InvalidIntervalError> {
    match text.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(seconds),
        _ => Err(InvalidIntervalError {
            input: text.to_string(),
        }),
    }
}

/// Coordinates one optional background worker with the single-threaded UI.
///
/// Start and stop are idempotent: starting while running and stopping while
/// stopped are no-ops, which guarantees at most one worker without any
/// locking beyond the cancellation token itself.
pub struct Controller {
    device_factory: DeviceFactory,
    waker: Waker,
    worker: Option<MoverHandle>,
    events: Option<Receiver<MoverEvent>>,
    interval: u64,
    countdown: Option<u64>,
    moving: bool,
    fault: Option<String>,
}

impl Controller {
    /// Controller backed by the platform pointer device.
    pub fn new() -> Self {
        Self::with_device_factory(Arc::new(|| {
            SystemPointer::new().map(|p| Box::new(p) as Box<dyn Pointer + Send>)
        }))
    }

    /// Controller with a custom pointer source; used by tests to substitute
    /// scripted devices.
    pub fn with_device_factory(device_factory: DeviceFactory) -> Self {
        Self {
            device_factory,
            waker: Arc::new(|| {}),
            worker: None,
            events: None,
            interval: 0,
            countdown: None,
            moving: false,
            fault: None,
        }
    }

    /// Install the callback the worker fires after publishing an event. The
    /// UI passes a repaint request here.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Arc::new(waker);
    }

    /// Parse the interval text and launch the mover loop.
    ///
    /// No-op if a loop is already running. On parse failure nothing
    /// changes and no worker is created.
    pub fn start(&mut self, interval_text: &str) -> Result<(), InvalidIntervalError> {
        if self.worker.is_some() {
            debug!("Start ignored - mover loop already running");
            return Ok(());
        }

        let interval = parse_interval(interval_text)?;

        // Fresh channel per run: a straggler event from a previously
        // cancelled worker can never reach this run's display.
        let (tx, rx) = mpsc::channel();
        let handle = mover::spawn(
            interval,
            self.device_factory.clone(),
            tx,
            self.waker.clone(),
        );

        info!("Mover loop starting ({} second interval)", interval);
        self.worker = Some(handle);
        self.events = Some(rx);
        self.interval = interval;
        self.countdown = Some(interval);
        self.moving = false;
        Ok(())
    }

    /// Cancel the worker and restore the idle display. Safe to call from
    /// the click path, the window-close path, and the fault path alike;
    /// no-op when already stopped.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            debug!("Stop ignored - mover loop not running");
            return;
        };

        info!("Mover loop stop requested");
        worker.cancel();
        self.events = None;
        self.countdown = None;
        self.moving = false;
    }

    /// Drain pending worker events and apply them to the display model.
    /// Must be called from the UI thread; a fault event runs the normal
    /// stop procedure and records a user-visible message.
    pub fn pump_events(&mut self) {
        let Some(events) = &self.events else {
            return;
        };

        let pending: Vec<MoverEvent> = events.try_iter().collect();
        for event in pending {
            match event {
                MoverEvent::Countdown(remaining) => {
                    self.countdown = Some(remaining);
                    self.moving = false;
                }
                MoverEvent::Moving => {
                    self.countdown = Some(0);
                    self.moving = true;
                }
                MoverEvent::Faulted(e) => {
                    error!("Mover loop failed: {}", e);
                    self.fault = Some(e.to_string());
                    self.stop();
                    break;
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Interval of the current (or most recent) run.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Seconds remaining until the next nudge; `None` while stopped, which
    /// hides the countdown indicator.
    pub fn countdown(&self) -> Option<u64> {
        self.countdown
    }

    /// True for the instant between countdown exhaustion and the next
    /// cycle, while the pointer displacement is performed.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Fault message from a terminated worker, if any. Consumed on read.
    pub fn take_fault(&mut self) -> Option<String> {
        self.fault.take()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}
