//! The collaborator bundle produced by a driver factory.

use rover_common::hal::driver::{DisplaySurface, InputDevice, MotorActuator, SensorSource};

/// One instance of every collaborator the core needs.
///
/// Built once at startup; the coordinator moves the input device and
/// motors into the control loop, the sensor into the telemetry thread and
/// the display behind the shared surface lock.
pub struct Hardware {
    /// Handheld controller.
    pub input: Box<dyn InputDevice>,
    /// Steering and drive motors.
    pub motors: Box<dyn MotorActuator>,
    /// Temperature probe data source.
    pub sensor: Box<dyn SensorSource>,
    /// Output panel.
    pub display: Box<dyn DisplaySurface>,
}

impl std::fmt::Debug for Hardware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hardware")
            .field("input", &self.input.name())
            .field("motors", &self.motors.name())
            .field("display", &self.display.size())
            .finish_non_exhaustive()
    }
}
