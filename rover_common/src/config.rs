//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load the rover's TOML
//! configuration file. Every section and field has a default, so an empty
//! file (or no file at all) yields the stock Raspberry Pi setup.
//!
//! # Usage
//!
//! ```rust,no_run
//! use rover_common::config::{ConfigLoader, ConfigError, RoverConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = RoverConfig::load(Path::new("rover.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use crate::consts::{
    CONTROL_IDLE_WAIT_MS, CONTROL_IDLE_WAIT_RANGE_MS, DISPLAY_CAPTION, DISPLAY_HEIGHT,
    DISPLAY_WIDTH, MAX_EVENTS_PER_ITERATION, MOTOR_PWM_PERIOD_NS, STEER_AXIS,
    TELEMETRY_FRAME_RATE_HZ, TELEMETRY_JOIN_TIMEOUT_MS, THROTTLE_AXIS, W1_BASE_DIR,
    W1_DATA_FILE, W1_DEVICE_PREFIX,
};
use crate::telemetry::TemperatureUnit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "rover-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SharedConfig {
    /// Logging verbosity level.
    pub log_level: LogLevel,

    /// Instance identifier used in log output.
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: "rover".to_string(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Control loop settings (`[control]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlConfig {
    /// Physical axis driving the steering channel.
    pub steer_axis: u8,
    /// Physical axis driving the throttle channel.
    pub throttle_axis: u8,
    /// Invert the throttle axis (controllers report stick-up as negative).
    pub invert_throttle: bool,
    /// Upper bound on events drained per iteration.
    pub max_events_per_iteration: usize,
    /// Sleep after an empty poll [ms], 1–5.
    pub idle_wait_ms: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            steer_axis: STEER_AXIS,
            throttle_axis: THROTTLE_AXIS,
            invert_throttle: true,
            max_events_per_iteration: MAX_EVENTS_PER_ITERATION,
            idle_wait_ms: CONTROL_IDLE_WAIT_MS,
        }
    }
}

impl ControlConfig {
    /// Idle wait as a `Duration`.
    pub fn idle_wait(&self) -> Duration {
        Duration::from_millis(self.idle_wait_ms)
    }
}

/// Telemetry loop settings (`[telemetry]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Target frame rate [Hz].
    pub frame_rate_hz: u32,
    /// Display unit for temperatures.
    pub unit: TemperatureUnit,
    /// Bounded wait for the telemetry thread at shutdown [ms].
    pub join_timeout_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: TELEMETRY_FRAME_RATE_HZ,
            unit: TemperatureUnit::default(),
            join_timeout_ms: TELEMETRY_JOIN_TIMEOUT_MS,
        }
    }
}

impl TelemetryConfig {
    /// Time budget of one frame. Zero if the rate is zero (rejected by validation).
    pub fn frame_budget(&self) -> Duration {
        match self.frame_rate_hz {
            0 => Duration::ZERO,
            hz => Duration::from_secs(1) / hz,
        }
    }

    /// Shutdown join timeout as a `Duration`.
    pub fn join_timeout(&self) -> Duration {
        Duration::from_millis(self.join_timeout_ms)
    }
}

/// Temperature probe discovery (`[sensor]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    /// Directory listing the 1-Wire devices.
    pub base_dir: PathBuf,
    /// Device directory name prefix (family code).
    pub device_prefix: String,
    /// Data file inside the device directory.
    pub data_file: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(W1_BASE_DIR),
            device_prefix: W1_DEVICE_PREFIX.to_string(),
            data_file: W1_DATA_FILE.to_string(),
        }
    }
}

/// Output panel (`[display]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Width [px].
    pub width: u32,
    /// Height [px].
    pub height: u32,
    /// Window caption.
    pub caption: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            caption: DISPLAY_CAPTION.to_string(),
        }
    }
}

/// One bidirectional motor: a PWM channel per direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotorChannelConfig {
    /// sysfs PWM channel directory driven for positive values.
    pub forward: PathBuf,
    /// sysfs PWM channel directory driven for negative values.
    pub backward: PathBuf,
}

/// Drive motors (`[motors]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotorConfig {
    /// PWM period shared by all channels [ns].
    pub period_ns: u64,
    /// Steering motor.
    pub steer: MotorChannelConfig,
    /// Rear drive motor.
    pub drive: MotorChannelConfig,
}

impl Default for MotorConfig {
    fn default() -> Self {
        let channel = |n: u8| PathBuf::from(format!("/sys/class/pwm/pwmchip0/pwm{n}"));
        Self {
            period_ns: MOTOR_PWM_PERIOD_NS,
            steer: MotorChannelConfig {
                forward: channel(0),
                backward: channel(1),
            },
            drive: MotorChannelConfig {
                forward: channel(2),
                backward: channel(3),
            },
        }
    }
}

/// Complete rover configuration (`rover.toml`).
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// service_name = "rover-01"
///
/// [control]
/// idle_wait_ms = 3
///
/// [telemetry]
/// unit = "celsius"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoverConfig {
    /// Common fields.
    pub shared: SharedConfig,
    /// Control loop.
    pub control: ControlConfig,
    /// Telemetry loop.
    pub telemetry: TelemetryConfig,
    /// Temperature probe.
    pub sensor: SensorConfig,
    /// Output panel.
    pub display: DisplayConfig,
    /// Drive motors.
    pub motors: MotorConfig,
}

impl RoverConfig {
    /// Validate semantic constraints across all sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));

        if self.control.steer_axis == self.control.throttle_axis {
            return invalid(format!(
                "steer_axis and throttle_axis must differ (both {})",
                self.control.steer_axis
            ));
        }
        if self.control.max_events_per_iteration == 0 {
            return invalid("max_events_per_iteration must be > 0".to_string());
        }
        if !CONTROL_IDLE_WAIT_RANGE_MS.contains(&self.control.idle_wait_ms) {
            return invalid(format!(
                "idle_wait_ms must be in {}..={} (got {})",
                CONTROL_IDLE_WAIT_RANGE_MS.start(),
                CONTROL_IDLE_WAIT_RANGE_MS.end(),
                self.control.idle_wait_ms
            ));
        }
        if self.telemetry.frame_rate_hz == 0 {
            return invalid("frame_rate_hz must be > 0".to_string());
        }
        if self.telemetry.join_timeout_ms == 0 {
            return invalid("join_timeout_ms must be > 0".to_string());
        }
        if self.display.width == 0 || self.display.height == 0 {
            return invalid(format!(
                "display size must be non-zero (got {}x{})",
                self.display.width, self.display.height
            ));
        }
        if self.sensor.device_prefix.is_empty() || self.sensor.data_file.is_empty() {
            return invalid("sensor device_prefix and data_file cannot be empty".to_string());
        }
        if self.motors.period_ns == 0 {
            return invalid("motors.period_ns must be > 0".to_string());
        }
        Ok(())
    }

    /// Load and validate in one step.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Trait for loading configuration from TOML files.
///
/// Provides a default implementation for any type implementing
/// `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation: any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
