//! Raspberry Pi rover backend.
//!
//! - [`w1`] - DS18B20 probe on the 1-Wire bus
//! - [`pwm`] - steering and drive H-bridges on sysfs PWM
//! - `gamepad` - controller via `gilrs` (feature `gamepad`)
//! - `window` - panel window via `minifb` (feature `window`)
//! - [`headless`] - offscreen panel when `window` is off

#[cfg(feature = "gamepad")]
pub mod gamepad;
pub mod headless;
pub mod pwm;
pub mod w1;
#[cfg(feature = "window")]
pub mod window;

use crate::hardware::Hardware;
use rover_common::config::RoverConfig;
use rover_common::hal::driver::{DisplaySurface, HalError, InputDevice};
use rover_common::signal::QuitSignal;
use tracing::info;

/// Factory registered as `"raspberry_pi"`.
///
/// The probe is located first; a rover without one refuses to start.
/// Input comes next so a build without the `gamepad` feature fails before
/// the panel or the H-bridges are touched.
pub fn create_hardware(config: &RoverConfig, quit: &QuitSignal) -> Result<Hardware, HalError> {
    let sensor = w1::W1Sensor::discover(&config.sensor)?;
    let input = open_input()?;
    let display = open_display(config, quit)?;
    let motors = pwm::PwmMotors::open(&config.motors)?;
    info!("Raspberry Pi hardware ready");

    Ok(Hardware {
        input,
        motors: Box::new(motors),
        sensor: Box::new(sensor),
        display,
    })
}

#[cfg(feature = "window")]
fn open_display(
    config: &RoverConfig,
    quit: &QuitSignal,
) -> Result<Box<dyn DisplaySurface>, HalError> {
    Ok(Box::new(window::WindowDisplay::open(&config.display, quit)?))
}

#[cfg(not(feature = "window"))]
fn open_display(
    config: &RoverConfig,
    _quit: &QuitSignal,
) -> Result<Box<dyn DisplaySurface>, HalError> {
    info!("Built without the window feature, panel is headless");
    Ok(Box::new(headless::HeadlessDisplay::new(
        config.display.width,
        config.display.height,
    )))
}

#[cfg(feature = "gamepad")]
fn open_input() -> Result<Box<dyn InputDevice>, HalError> {
    Ok(Box::new(gamepad::GamepadInput::open()?))
}

#[cfg(not(feature = "gamepad"))]
fn open_input() -> Result<Box<dyn InputDevice>, HalError> {
    Err(HalError::InitFailed(
        "built without the gamepad feature".to_string(),
    ))
}
