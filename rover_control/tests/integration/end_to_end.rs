//! Steady-state driving through both loops.

use super::{Bench, settle};
use rover_common::config::RoverConfig;
use rover_common::control::command::ActuationCommand;
use rover_common::telemetry::TemperatureUnit;
use rover_control::TelemetryExit;

#[test]
fn axes_drive_motors_every_iteration() {
    let bench = Bench::new(RoverConfig::default());

    let (result, (held, count_before_quit)) = bench.run_with(|handles, quit| {
        handles.script.axis(2, 0.5);
        handles.script.axis(1, -0.3);
        settle();
        let held = handles.motors.commands();
        let count = handles.motors.count();
        quit.raise();
        (held, count)
    });

    let report = result.unwrap();
    let expected = ActuationCommand::new(0.5, 0.3);

    // After the events land, the same command repeats each iteration.
    let first = held.iter().position(|c| *c == expected).unwrap();
    assert!(held[first..].iter().all(|c| *c == expected));
    assert!(held.len() - first > 5);
    assert!(report.control.commands > count_before_quit);
    assert!(report.control.commands >= report.control.iterations);
}

#[test]
fn panel_shows_probe_temperature() {
    let bench = Bench::new(RoverConfig::default());
    let display = bench.handles.display.clone();

    let (result, ()) = bench.run_with(|_, quit| {
        super::settle();
        quit.raise();
    });

    assert!(matches!(result.unwrap().telemetry, TelemetryExit::Stopped(_)));
    let frames = display.frames();
    assert!(!frames.is_empty());
    let last = frames.last().unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].text, "Temperature: 70.70 F");
    assert_eq!((last[0].x, last[0].y), (10, 10));
}

#[test]
fn not_ready_reads_never_replace_shown_value() {
    let mut config = RoverConfig::default();
    config.telemetry.unit = TemperatureUnit::Celsius;
    let bench = Bench::new(config);
    let display = bench.handles.display.clone();

    let (result, ()) = bench.run_with(|handles, quit| {
        super::settle();
        handles.sensor.set_ready(false);
        handles.sensor.set_temperature(99_000);
        super::settle();
        quit.raise();
    });

    result.unwrap();
    let texts: Vec<String> = display
        .frames()
        .into_iter()
        .filter_map(|frame| frame.first().map(|t| t.text.clone()))
        .collect();
    assert!(texts.iter().all(|t| t == "Temperature: 21.50 C"), "{texts:?}");
}

#[test]
fn sensor_disconnect_does_not_stop_control() {
    let bench = Bench::new(RoverConfig::default());
    let display = bench.handles.display.clone();

    let (result, commands_during_outage) = bench.run_with(|handles, quit| {
        handles.sensor.disconnect();
        super::settle();
        let before = handles.motors.count();
        super::settle();
        let during = handles.motors.count() - before;
        quit.raise();
        during
    });

    result.unwrap();
    assert!(commands_during_outage > 0);
    let last = display.frames().last().cloned().unwrap();
    assert_eq!(last[0].text, "Temperature: sensor unavailable");
}
