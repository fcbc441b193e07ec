//! Collaborator traits and error types.
//!
//! This module defines:
//! - `HalError` enum - Error types for HAL operations
//! - `InputDevice` trait - Non-blocking controller event source
//! - `MotorActuator` trait - Two-channel drive output
//! - `SensorSource` trait - Raw temperature probe records
//! - `DisplaySurface` trait - Text panel canvas

use crate::control::command::ActuationCommand;
use crate::hal::types::{InputEvent, Rgb};
use thiserror::Error;

/// Error types for HAL operations.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Required device was not found during discovery
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Device stopped accepting commands (unplugged, permission lost)
    #[error("Device unavailable: {0}")]
    Unavailable(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Handheld controller.
///
/// Exactly one device is active. Polling never blocks; the control loop
/// drains events in bounded batches.
pub trait InputDevice {
    /// Returns the device backend identifier (e.g., "simulation", "gamepad").
    fn name(&self) -> &'static str;

    /// Take the next pending event, or `None` if the queue is empty.
    ///
    /// # Errors
    /// An error means the device is gone; the control loop treats it as
    /// unrecoverable.
    fn poll_event(&mut self) -> Result<Option<InputEvent>, HalError>;

    /// Release the device.
    ///
    /// Default implementation does nothing.
    fn release(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}

/// Two-channel drive output: steering motor and drive motor.
pub trait MotorActuator {
    /// Returns the actuator backend identifier.
    fn name(&self) -> &'static str;

    /// Apply a set-point to both channels.
    ///
    /// # Errors
    /// `HalError::Unavailable` if the hardware no longer accepts commands.
    fn set(&mut self, command: ActuationCommand) -> Result<(), HalError>;

    /// Stop driving and release the channels.
    fn release(&mut self) -> Result<(), HalError>;
}

/// Raw temperature probe data source.
///
/// Moved into the telemetry thread, hence `Send`.
pub trait SensorSource: Send {
    /// Read the latest raw record (two text lines).
    ///
    /// # Errors
    /// Any I/O failure; the caller reports it as a disconnected sensor.
    fn read_record(&mut self) -> Result<String, HalError>;
}

/// Fixed-size text panel.
///
/// Shared between the telemetry thread and the coordinator behind a mutex,
/// hence `Send`.
pub trait DisplaySurface: Send {
    /// Surface dimensions `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with one color.
    fn fill(&mut self, color: Rgb);

    /// Draw one line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb);

    /// Present the drawn frame.
    fn flip(&mut self) -> Result<(), HalError>;

    /// Tear the surface down. No draw calls follow.
    ///
    /// Default implementation does nothing.
    fn close(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}
