//! Hardware backends.
//!
//! - [`simulation`] - In-process collaborators for development and tests
//! - [`raspberry_pi`] - 1-Wire probe, sysfs PWM motors, gamepad, panel window
//!
//! # Adding New Backends
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Provide a `create_hardware` function matching `HardwareFactory`
//! 3. Register it in [`register_all_drivers`]

pub mod raspberry_pi;
pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Register every built-in backend.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register("simulation", simulation::create_hardware);
    registry.register("raspberry_pi", raspberry_pi::create_hardware);
}
