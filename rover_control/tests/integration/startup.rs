//! Startup: driver selection, probe discovery and file configuration.

use super::Bench;
use rover_common::config::{ConfigLoader, RoverConfig};
use rover_common::hal::driver::HalError;
use rover_common::signal::QuitSignal;
use rover_common::telemetry::TemperatureUnit;
use rover_hal::DriverRegistry;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn missing_probe_fails_before_any_loop() {
    let bus = TempDir::new().unwrap();
    std::fs::create_dir(bus.path().join("w1_bus_master1")).unwrap();

    let mut config = RoverConfig::default();
    config.sensor.base_dir = bus.path().to_path_buf();

    let result = DriverRegistry::with_builtin_drivers().create_hardware(
        "raspberry_pi",
        &config,
        &QuitSignal::new(),
    );
    assert!(matches!(result, Err(HalError::DeviceNotFound(_))));
}

#[test]
fn unknown_driver_is_rejected() {
    let result = DriverRegistry::with_builtin_drivers().create_hardware(
        "lego",
        &RoverConfig::default(),
        &QuitSignal::new(),
    );
    assert!(matches!(result, Err(HalError::DriverNotFound(name)) if name == "lego"));
}

#[test]
fn file_config_flows_into_both_loops() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[control]
steer_axis = 0
throttle_axis = 3
invert_throttle = false

[telemetry]
unit = "celsius"
frame_rate_hz = 25
"#
    )
    .unwrap();

    let config = RoverConfig::load(file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.telemetry.unit, TemperatureUnit::Celsius);

    let bench = Bench::new(config);
    let display = bench.handles.display.clone();
    let motors = bench.handles.motors.clone();
    let (result, ()) = bench.run_with(|handles, quit| {
        handles.script.axis(0, -0.75);
        handles.script.axis(3, 0.25);
        super::settle();
        quit.raise();
    });
    result.unwrap();

    // Axes 0 and 3 drive the rover, throttle passes through uninverted.
    let commands = motors.commands();
    let driven = &commands[commands.len() - 2];
    assert_eq!((driven.steer(), driven.throttle()), (-0.75, 0.25));
    assert!(commands.last().unwrap().is_stop());

    let frames = display.frames();
    assert_eq!(frames.last().unwrap()[0].text, "Temperature: 21.50 C");
}
