//! Drive control types shared between the control loop and the drivers.
//!
//! - [`axis`] - Raw controller axis samples and their normalization
//! - [`command`] - Bounded (steer, throttle) actuation commands

pub mod axis;
pub mod command;
