//! # Rover HAL Library
//!
//! Implementations of the collaborator traits defined in
//! `rover_common::hal::driver`: the input device, the motor actuator, the
//! temperature sensor source and the display surface.
//!
//! # Module Structure
//!
//! - [`hardware`] - `Hardware` bundle handed to the coordinator
//! - [`driver_registry`] - Name → hardware factory registration
//! - [`drivers`] - Simulation and Raspberry Pi backends
//! - [`framebuffer`] - Pixel buffer with text rendering shared by all displays
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        rover_hal                         │
//! │  ┌──────────────────┐      ┌──────────────────────────┐  │
//! │  │ DriverRegistry   │─────►│ factory(config, quit)    │  │
//! │  └──────────────────┘      └────────────┬─────────────┘  │
//! │                                         ▼                │
//! │   Hardware { input, motors, sensor, display }            │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod driver_registry;
pub mod drivers;
pub mod framebuffer;
pub mod hardware;

// Re-export key types for convenience
pub use crate::driver_registry::{DriverRegistry, HardwareFactory};
pub use crate::framebuffer::Framebuffer;
pub use crate::hardware::Hardware;
