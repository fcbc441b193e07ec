//! Shutdown ordering and the bounded telemetry join.

use super::{Bench, settle};
use rover_common::config::RoverConfig;
use rover_common::hal::driver::{DisplaySurface, HalError};
use rover_common::hal::types::Rgb;
use rover_common::signal::QuitSignal;
use rover_control::{ControlError, Coordinator, CoordinatorError, TelemetryExit};
use rover_hal::Hardware;
use rover_hal::drivers::simulation;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn quit_mid_loop_stops_everything() {
    let bench = Bench::new(RoverConfig::default());
    let run_flag = bench.coordinator.run_flag();
    let motors = bench.handles.motors.clone();
    let display = bench.handles.display.clone();

    let (result, quit_at) = bench.run_with(|handles, _| {
        handles.script.axis(2, 0.5);
        handles.script.axis(1, -0.3);
        settle();
        handles.script.quit();
        Instant::now()
    });
    let stopped_in = quit_at.elapsed();

    let report = result.unwrap();
    assert!(!run_flag.is_running());
    assert_eq!(motors.last(), Some(rover_common::control::command::ActuationCommand::STOP));
    assert!(motors.is_released());
    assert!(matches!(report.telemetry, TelemetryExit::Stopped(_)));
    assert!(report.surface_closed);
    assert!(display.is_closed());
    assert_eq!(display.writes_after_close(), 0);
    // Telemetry notices the lowered flag within one frame budget plus slack.
    let budget = RoverConfig::default().telemetry.frame_budget();
    let wait = report.telemetry_wait;
    assert!(wait < budget + Duration::from_millis(50), "{wait:?}");
    assert!(stopped_in < Duration::from_millis(400), "{stopped_in:?}");
}

#[test]
fn external_quit_signal_stops_everything() {
    let bench = Bench::new(RoverConfig::default());
    let display = bench.handles.display.clone();

    let (result, ()) = bench.run_with(|_, quit| {
        settle();
        quit.raise();
    });

    result.unwrap();
    assert!(display.is_closed());
    assert_eq!(display.writes_after_close(), 0);
}

#[test]
fn controller_unplug_is_fatal() {
    let config = RoverConfig::default();
    let (hardware, handles) = simulation::rig(&config, true);
    let simulation::SimulationHandles {
        script,
        motors,
        display,
        ..
    } = handles;
    drop(script);

    let err = Coordinator::new(config, QuitSignal::new())
        .run(hardware)
        .unwrap_err();
    assert!(matches!(
        err,
        CoordinatorError::Control(ControlError::Input(HalError::Unavailable(_)))
    ));
    assert!(motors.last().unwrap().is_stop());
    assert!(display.is_closed());
}

/// Display whose present call blocks far longer than the join timeout.
struct StuckDisplay {
    present: Duration,
    closed: Arc<AtomicBool>,
    writes_after_close: Arc<AtomicU64>,
}

impl DisplaySurface for StuckDisplay {
    fn size(&self) -> (u32, u32) {
        (500, 700)
    }

    fn fill(&mut self, _color: Rgb) {
        if self.closed.load(Ordering::SeqCst) {
            self.writes_after_close.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn draw_text(&mut self, _text: &str, _x: i32, _y: i32, _color: Rgb) {}

    fn flip(&mut self) -> Result<(), HalError> {
        thread::sleep(self.present);
        Ok(())
    }

    fn close(&mut self) -> Result<(), HalError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn stuck_render_is_abandoned_without_blocking_teardown() {
    let config = RoverConfig::default();
    let join_timeout = config.telemetry.join_timeout();
    let (rig, handles) = simulation::rig(&config, false);
    let closed = Arc::new(AtomicBool::new(false));
    let writes_after_close = Arc::new(AtomicU64::new(0));
    let hardware = Hardware {
        display: Box::new(StuckDisplay {
            present: Duration::from_millis(1500),
            closed: closed.clone(),
            writes_after_close: writes_after_close.clone(),
        }),
        ..rig
    };

    let quit = QuitSignal::new();
    let trigger = quit.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        trigger.raise();
    });

    let started = Instant::now();
    let report = Coordinator::new(config, quit).run(hardware).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(report.telemetry, TelemetryExit::Abandoned);
    assert!(!report.surface_closed);
    assert!(handles.motors.is_released());
    // Join timeout, close grace and slack; nowhere near the stuck present.
    assert!(elapsed < join_timeout + Duration::from_millis(600), "{elapsed:?}");
    assert!(!closed.load(Ordering::SeqCst));

    // The present finishes, the render lets go, the panel closes after it.
    let deadline = Instant::now() + Duration::from_secs(3);
    while !closed.load(Ordering::SeqCst) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(20));
    }
    assert!(closed.load(Ordering::SeqCst));
    thread::sleep(Duration::from_millis(100));
    assert_eq!(writes_after_close.load(Ordering::SeqCst), 0);
}
