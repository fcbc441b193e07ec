//! Simulation backend.
//!
//! Software collaborators for running the full control/telemetry stack
//! without a rover attached. Every collaborator comes with a cloneable
//! handle for scripting inputs and inspecting outputs from tests.

mod display;
mod input;
mod motors;
mod sensor;

pub use display::{DisplayProbe, DrawnText, SimulatedDisplay};
pub use input::{InputScript, SimulatedInput};
pub use motors::{MotorLog, SimulatedMotors};
pub use sensor::{SensorProbe, SimulatedSensor};

use crate::hardware::Hardware;
use rover_common::config::RoverConfig;
use rover_common::hal::driver::HalError;
use rover_common::signal::QuitSignal;

/// Probe temperature reported by the stock simulation [m°C].
const SIM_TEMPERATURE_MILLIDEGREES: i32 = 21_500;

/// Every Nth simulated read reports a conversion still in flight.
const SIM_NOT_READY_EVERY: u64 = 7;

/// Handles onto a simulated rig.
#[derive(Clone)]
pub struct SimulationHandles {
    /// Push controller events.
    pub script: InputScript,
    /// Inspect motor commands.
    pub motors: MotorLog,
    /// Control the probe.
    pub sensor: SensorProbe,
    /// Inspect rendered frames.
    pub display: DisplayProbe,
}

/// Build a simulated rig and the handles controlling it.
///
/// The controller stays plugged in while any clone of the script handle is
/// alive or forever if `unplug_on_drop` is false.
pub fn rig(config: &RoverConfig, unplug_on_drop: bool) -> (Hardware, SimulationHandles) {
    let (input, script) = SimulatedInput::channel(unplug_on_drop);
    let (motors, motor_log) = SimulatedMotors::new();
    let (sensor, sensor_probe) = SimulatedSensor::new(SIM_TEMPERATURE_MILLIDEGREES);
    let (display, display_probe) = SimulatedDisplay::new(config.display.width, config.display.height);

    let hardware = Hardware {
        input: Box::new(input),
        motors: Box::new(motors),
        sensor: Box::new(sensor),
        display: Box::new(display),
    };
    let handles = SimulationHandles {
        script,
        motors: motor_log,
        sensor: sensor_probe,
        display: display_probe,
    };
    (hardware, handles)
}

/// Factory registered as `"simulation"`.
///
/// Nobody scripts the controller, so the rover idles centered until the
/// quit signal is raised.
pub fn create_hardware(config: &RoverConfig, _quit: &QuitSignal) -> Result<Hardware, HalError> {
    let (hardware, handles) = rig(config, false);
    handles.sensor.set_not_ready_every(Some(SIM_NOT_READY_EVERY));
    Ok(hardware)
}
