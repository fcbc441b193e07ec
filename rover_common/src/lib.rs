//! Rover Common Library
//!
//! Shared types, collaborator traits and configuration loading for all
//! rover workspace crates.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and the `RoverConfig` tree
//! - [`consts`] - Default timings, device paths and panel geometry
//! - [`control`] - Axis normalization and bounded actuation commands
//! - [`hal`] - Collaborator traits (input, motors, sensor, display) and HAL errors
//! - [`signal`] - One-shot run flag and quit latch shared across threads
//! - [`telemetry`] - Temperature readings and display units
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use rover_common::prelude::*;
//!
//! let command = ActuationCommand::new(0.5, 3.0);
//! assert_eq!(command.throttle(), 1.0);
//! ```

pub mod config;
pub mod consts;
pub mod control;
pub mod hal;
pub mod prelude;
pub mod signal;
pub mod telemetry;
