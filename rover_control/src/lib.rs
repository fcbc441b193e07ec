//! # Rover Control Library
//!
//! Teleoperation core for a two-motor rover: a foreground control loop
//! turning controller axes into bounded motor set-points, and a background
//! telemetry loop sampling a temperature probe onto a text panel.
//!
//! ## Threads
//!
//! - **control** (caller's thread) - drains input, submits one clamped
//!   command per iteration, owns the run flag
//! - **telemetry** - reads the sensor and redraws the panel at a fixed rate
//!
//! The [`coordinator::Coordinator`] shares the display surface between the
//! telemetry loop and teardown behind one mutex, so the surface is never
//! closed while a frame is being drawn.

pub mod control;
pub mod coordinator;
pub mod error;
pub mod presenter;
pub mod sensor;
pub mod telemetry;

pub use crate::control::{ControlLoop, ControlPhase, ControlState, ControlStats};
pub use crate::coordinator::{Coordinator, ShutdownReport, TelemetryExit};
pub use crate::error::{ControlError, CoordinatorError, SensorError};
