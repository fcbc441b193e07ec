//! Config file loading tests.
//!
//! Exercises `ConfigLoader` against real files: missing file, syntax
//! errors, partial documents falling back to defaults, and validation of
//! loaded values.

use rover_common::config::{ConfigError, ConfigLoader, LogLevel, RoverConfig};
use rover_common::telemetry::TemperatureUnit;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_missing_file() {
    let result = RoverConfig::load(Path::new("/nonexistent/rover.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}

#[test]
fn test_parse_error() {
    let file = write_config("invalid toml {{{{");
    let result = RoverConfig::load(file.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_partial_document_keeps_defaults() {
    let file = write_config(
        r#"
[shared]
log_level = "debug"
service_name = "rover-bench"

[telemetry]
unit = "celsius"
frame_rate_hz = 10

[sensor]
base_dir = "/tmp/w1"
"#,
    );

    let config = RoverConfig::load_validated(file.path()).unwrap();
    assert_eq!(config.shared.log_level, LogLevel::Debug);
    assert_eq!(config.shared.service_name, "rover-bench");
    assert_eq!(config.telemetry.unit, TemperatureUnit::Celsius);
    assert_eq!(config.telemetry.frame_rate_hz, 10);
    assert_eq!(config.telemetry.frame_budget().as_millis(), 100);
    assert_eq!(config.sensor.base_dir, PathBuf::from("/tmp/w1"));
    // Untouched fields come from defaults.
    assert_eq!(config.sensor.device_prefix, "28");
    assert_eq!(config.sensor.data_file, "w1_slave");
    assert_eq!(config.control.steer_axis, 2);
    assert_eq!(config.telemetry.join_timeout_ms, 250);
}

#[test]
fn test_motor_channels() {
    let file = write_config(
        r#"
[motors]
period_ns = 500000

[motors.steer]
forward = "/sys/class/pwm/pwmchip0/pwm0"
backward = "/sys/class/pwm/pwmchip0/pwm1"

[motors.drive]
forward = "/sys/class/pwm/pwmchip1/pwm0"
backward = "/sys/class/pwm/pwmchip1/pwm1"
"#,
    );

    let config = RoverConfig::load_validated(file.path()).unwrap();
    assert_eq!(config.motors.period_ns, 500_000);
    assert_eq!(
        config.motors.drive.backward,
        PathBuf::from("/sys/class/pwm/pwmchip1/pwm1")
    );
}

#[test]
fn test_loaded_values_are_validated() {
    let file = write_config(
        r#"
[control]
steer_axis = 1
throttle_axis = 1
"#,
    );

    // Parsing alone succeeds; validation catches the clash.
    assert!(RoverConfig::load(file.path()).is_ok());
    assert!(matches!(
        RoverConfig::load_validated(file.path()),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_unknown_section_rejected() {
    let file = write_config("[network]\nport = 8080\n");
    assert!(matches!(
        RoverConfig::load(file.path()),
        Err(ConfigError::ParseError(_))
    ));
}
