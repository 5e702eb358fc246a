//! Background mover loop
//!
//! One worker thread that counts down the configured interval, publishing
//! the remaining seconds once per second, then nudges the pointer and
//! starts the next cycle. The controller owns the receiving end of the
//! event channel and a [`CancelToken`] shared with the worker; the token's
//! timed wait is the worker's only suspension point, so a stop request
//! takes effect within one countdown tick.

use crate::constants::COUNTDOWN_TICK_MS;
use crate::pointer::{nudge, Pointer, PointerError};
use log::{debug, error, info};
use parking_lot::{Condvar, Mutex};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Builds the pointer device inside the worker thread, mirroring where the
/// platform handle actually gets used. Construction failure is reported
/// through the normal fault path.
pub type DeviceFactory =
    Arc<dyn Fn() -> Result<Box<dyn Pointer + Send>, PointerError> + Send + Sync>;

/// Callback invoked after every published event so the UI repaints promptly.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Update published by the worker for the controller to apply on the UI
/// thread. The worker never touches display state directly.
#[derive(Debug)]
pub enum MoverEvent {
    /// Seconds remaining until the next nudge, in `[1, interval]`.
    Countdown(u64),
    /// Countdown reached zero; the nudge is being performed.
    Moving,
    /// The pointer capability failed; the loop has terminated.
    Faulted(PointerError),
}

/// Cooperative cancellation shared between controller and worker.
///
/// A mutex-guarded flag paired with a condvar: `cancel` flips the flag and
/// wakes any in-progress wait, `wait` blocks up to a timeout but returns as
/// soon as cancellation is observed. Cancellation is sticky.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Default)]
struct CancelInner {
    cancelled: Mutex<bool>,
    cond: Condvar,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and interrupt any wait in progress.
    pub fn cancel(&self) {
        let mut cancelled = self.inner.cancelled.lock();
        *cancelled = true;
        self.inner.cond.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.cancelled.lock()
    }

    /// Block for up to `timeout`, returning early if cancelled. Returns the
    /// cancellation state observed when the wait ended.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.inner.cancelled.lock();
        while !*cancelled {
            if self.inner.cond.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}

/// Handle to a running mover loop, held by the controller for signalling.
pub struct MoverHandle {
    token: CancelToken,
    thread: JoinHandle<()>,
}

impl MoverHandle {
    /// Signal the worker to stop. The worker observes the token at its next
    /// loop boundary and exits without publishing further events.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker thread to exit. Only sensible after `cancel` or
    /// a fault; used by tests to assert clean termination.
    pub fn join(self) {
        let _ = self.thread.join();
    }
}

/// Spawn the mover loop for one run.
///
/// At most one loop may exist at a time; the controller enforces this by
/// treating start-while-running as a no-op.
pub fn spawn(
    interval_seconds: u64,
    device_factory: DeviceFactory,
    events: Sender<MoverEvent>,
    waker: Waker,
) -> MoverHandle {
    let token = CancelToken::new();
    let worker_token = token.clone();

    let thread = thread::Builder::new()
        .name("mover".to_string())
        .spawn(move || run(interval_seconds, device_factory, events, worker_token, waker))
        .expect("Failed to spawn mover thread");

    MoverHandle { token, thread }
}

/// The loop body: Counting until the countdown hits zero, then Moving, then
/// Counting again, until cancelled or the pointer capability fails.
fn run(
    interval_seconds: u64,
    device_factory: DeviceFactory,
    events: Sender<MoverEvent>,
    token: CancelToken,
    waker: Waker,
) {
    let tick = Duration::from_millis(COUNTDOWN_TICK_MS);

    let mut device = match device_factory() {
        Ok(device) => device,
        Err(e) => {
            error!("Mover loop could not open pointer device: {}", e);
            publish(&events, &waker, MoverEvent::Faulted(e));
            return;
        }
    };

    info!("Mover loop started ({} second interval)", interval_seconds);

    loop {
        let mut remaining = interval_seconds;
        while remaining > 0 {
            if token.is_cancelled() {
                debug!("Mover loop cancelled during countdown");
                return;
            }
            if !publish(&events, &waker, MoverEvent::Countdown(remaining)) {
                return;
            }
            if token.wait(tick) {
                debug!("Mover loop cancelled while waiting out a tick");
                return;
            }
            remaining -= 1;
        }

        if token.is_cancelled() {
            return;
        }
        if !publish(&events, &waker, MoverEvent::Moving) {
            return;
        }

        if let Err(e) = nudge(device.as_mut()) {
            error!("Mover loop terminating: {}", e);
            publish(&events, &waker, MoverEvent::Faulted(e));
            return;
        }
    }
}

/// Send an event and wake the UI. Returns false when the receiving side is
/// gone, which means the run was torn down and the loop should exit.
fn publish(events: &Sender<MoverEvent>, waker: &Waker, event: MoverEvent) -> bool {
    let delivered = events.send(event).is_ok();
    if delivered {
        waker();
    }
    delivered
}
