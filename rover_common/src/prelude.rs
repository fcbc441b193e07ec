//! Prelude module for common re-exports.
//!
//! ```rust
//! use rover_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, RoverConfig, SharedConfig};

// ─── Control ────────────────────────────────────────────────────────
pub use crate::control::axis::{AxisSample, normalize};
pub use crate::control::command::ActuationCommand;

// ─── HAL ────────────────────────────────────────────────────────────
pub use crate::hal::driver::{DisplaySurface, HalError, InputDevice, MotorActuator, SensorSource};
pub use crate::hal::types::{InputEvent, Rgb};

// ─── Shutdown ───────────────────────────────────────────────────────
pub use crate::signal::{QuitSignal, RunFlag};

// ─── Telemetry ──────────────────────────────────────────────────────
pub use crate::telemetry::{TemperatureReading, TemperatureUnit};
