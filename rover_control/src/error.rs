//! Error types for the control crate.

use rover_common::hal::driver::HalError;
use thiserror::Error;

/// Sensor read failures.
///
/// A record that is merely not ready is not an error; see
/// [`TemperatureReading::valid`](rover_common::telemetry::TemperatureReading).
#[derive(Debug, Clone, Error)]
pub enum SensorError {
    /// The data source could not be read.
    #[error("Sensor disconnected: {0}")]
    Disconnected(String),
}

/// Fatal control loop failures.
#[derive(Debug, Clone, Error)]
pub enum ControlError {
    /// The motor actuator rejected a command.
    #[error("Actuation failed: {0}")]
    Actuation(HalError),

    /// The input device failed while running.
    #[error("Input device failed: {0}")]
    Input(HalError),
}

/// Coordinator failures.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The telemetry thread could not be started.
    #[error("Failed to spawn telemetry thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The control loop stopped on a fatal error.
    #[error(transparent)]
    Control(#[from] ControlError),
}
