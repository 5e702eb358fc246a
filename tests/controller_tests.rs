use jiggle::control::Controller;
use jiggle::pointer::{Pointer, PointerError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Pointer that records every synthetic move into shared storage.
struct RecorderPointer {
    at: (i32, i32),
    moves: Arc<Mutex<Vec<(i32, i32)>>>,
}

impl Pointer for RecorderPointer {
    fn position(&mut self) -> Result<(i32, i32), PointerError> {
        Ok(self.at)
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<(), PointerError> {
        self.at = (x, y);
        self.moves.lock().push((x, y));
        Ok(())
    }
}

fn recording_controller() -> (Controller, Arc<Mutex<Vec<(i32, i32)>>>) {
    let moves = Arc::new(Mutex::new(Vec::new()));
    let factory_moves = moves.clone();
    let controller = Controller::with_device_factory(Arc::new(move || {
        Ok(Box::new(RecorderPointer {
            at: (50, 60),
            moves: factory_moves.clone(),
        }) as Box<dyn Pointer + Send>)
    }));
    (controller, moves)
}

/// Pump the controller until `predicate` holds or the timeout expires.
fn pump_until(
    controller: &mut Controller,
    timeout: Duration,
    mut predicate: impl FnMut(&mut Controller) -> bool,
) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        controller.pump_events();
        if predicate(controller) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(25));
    }
}

#[test]
fn test_invalid_input_leaves_state_stopped() {
    let (mut controller, moves) = recording_controller();

    for input in ["0", "-5", "abc", "", "2.5"] {
        assert!(
            controller.start(input).is_err(),
            "{:?} must be rejected",
            input
        );
        assert!(!controller.is_running(), "{:?} must not start a worker", input);
        assert_eq!(controller.countdown(), None);
    }

    thread::sleep(Duration::from_millis(200));
    assert!(moves.lock().is_empty(), "no worker means no pointer moves");
}

#[test]
fn test_start_shows_countdown_at_interval() {
    let (mut controller, _moves) = recording_controller();

    controller.start("10").unwrap();
    assert!(controller.is_running());
    assert_eq!(controller.interval(), 10);
    assert_eq!(controller.countdown(), Some(10));
    assert!(!controller.is_moving());

    controller.stop();
}

#[test]
fn test_start_while_running_is_a_noop() {
    let (mut controller, _moves) = recording_controller();

    controller.start("5").unwrap();
    assert!(controller.start("99").is_ok());
    assert_eq!(
        controller.interval(),
        5,
        "a second start must not replace the running worker"
    );

    // Even invalid text is ignored while running.
    assert!(controller.start("abc").is_ok());
    assert!(controller.is_running());

    controller.stop();
}

#[test]
fn test_stop_while_stopped_is_a_noop() {
    let (mut controller, _moves) = recording_controller();

    controller.stop();
    controller.stop();
    assert!(!controller.is_running());
    assert_eq!(controller.countdown(), None);
}

#[test]
fn test_immediate_stop_prevents_any_pointer_move() {
    let (mut controller, moves) = recording_controller();

    controller.start("10").unwrap();
    controller.stop();

    assert!(!controller.is_running());
    assert_eq!(controller.countdown(), None, "countdown hides on stop");

    thread::sleep(Duration::from_millis(1500));
    controller.pump_events();
    assert_eq!(controller.countdown(), None, "no updates after stop");
    assert!(moves.lock().is_empty(), "no pointer move after stop");
}

#[test]
fn test_countdown_decrements_then_nudges_then_resets() {
    let (mut controller, moves) = recording_controller();

    controller.start("2").unwrap();
    assert_eq!(controller.countdown(), Some(2));

    assert!(
        pump_until(&mut controller, Duration::from_secs(4), |c| {
            c.countdown() == Some(1)
        }),
        "countdown must reach 1 after about a second"
    );

    // One full cycle: two moves restoring the original position, then the
    // countdown resets to the interval.
    assert!(
        pump_until(&mut controller, Duration::from_secs(4), |_| {
            moves.lock().len() >= 2
        }),
        "the nudge must happen once the countdown is exhausted"
    );
    assert_eq!(&moves.lock()[..2], &[(51, 61), (50, 60)]);

    assert!(
        pump_until(&mut controller, Duration::from_secs(2), |c| {
            c.countdown() == Some(2) && !c.is_moving()
        }),
        "countdown must reset to the interval after the nudge"
    );

    controller.stop();
}

#[test]
fn test_stop_during_countdown_yields_no_late_updates() {
    let (mut controller, moves) = recording_controller();

    controller.start("3").unwrap();
    assert!(pump_until(&mut controller, Duration::from_secs(4), |c| {
        c.countdown() == Some(2)
    }));

    controller.stop();
    assert!(!controller.is_running());
    assert_eq!(controller.countdown(), None);

    thread::sleep(Duration::from_millis(2500));
    controller.pump_events();
    assert_eq!(controller.countdown(), None);
    assert!(
        moves.lock().is_empty(),
        "stopping mid-countdown must cancel the pending nudge"
    );
}

#[test]
fn test_pointer_fault_recovers_to_idle() {
    struct DeniedPointer;

    impl Pointer for DeniedPointer {
        fn position(&mut self) -> Result<(i32, i32), PointerError> {
            Ok((0, 0))
        }

        fn move_to(&mut self, _x: i32, _y: i32) -> Result<(), PointerError> {
            Err(PointerError::Injection("permission denied".into()))
        }
    }

    let mut controller = Controller::with_device_factory(Arc::new(|| {
        Ok(Box::new(DeniedPointer) as Box<dyn Pointer + Send>)
    }));

    controller.start("1").unwrap();
    assert!(
        pump_until(&mut controller, Duration::from_secs(5), |c| !c.is_running()),
        "a pointer fault must run the stop procedure"
    );

    assert_eq!(controller.countdown(), None);
    let fault = controller.take_fault().expect("fault message recorded");
    assert!(fault.contains("permission denied"));
    assert!(controller.take_fault().is_none(), "fault is consumed on read");
}

#[test]
fn test_restart_after_stop_runs_a_fresh_cycle() {
    let (mut controller, moves) = recording_controller();

    controller.start("60").unwrap();
    controller.stop();

    controller.start("1").unwrap();
    assert_eq!(controller.interval(), 1);
    assert_eq!(controller.countdown(), Some(1));

    assert!(
        pump_until(&mut controller, Duration::from_secs(4), |_| {
            !moves.lock().is_empty()
        }),
        "the second run must drive the pointer"
    );

    controller.stop();
}
