//! Gamepad input through `gilrs`.
//!
//! Axis indices follow the common joystick layout: left stick X/Y are 0/1,
//! right stick X/Y are 2/3, triggers 4/5. Vertical axes are reported with
//! down positive, so pushing a stick forward gives a negative value.

use gilrs::{Axis, EventType, GamepadId, Gilrs};
use rover_common::hal::driver::{HalError, InputDevice};
use rover_common::hal::types::InputEvent;
use tracing::{debug, info, warn};

/// Joystick index for a `gilrs` axis. Unmapped axes are ignored.
pub fn axis_index(axis: Axis) -> Option<u8> {
    match axis {
        Axis::LeftStickX => Some(0),
        Axis::LeftStickY => Some(1),
        Axis::RightStickX => Some(2),
        Axis::RightStickY => Some(3),
        Axis::LeftZ => Some(4),
        Axis::RightZ => Some(5),
        _ => None,
    }
}

/// Convert a `gilrs` value (up positive) to the joystick convention.
pub fn axis_value(axis: Axis, value: f32) -> f64 {
    let value = f64::from(value);
    match axis {
        Axis::LeftStickY | Axis::RightStickY => -value,
        _ => value,
    }
}

/// First connected gamepad.
pub struct GamepadInput {
    gilrs: Gilrs,
    id: GamepadId,
}

impl GamepadInput {
    /// Open the gamepad subsystem and bind to the first connected pad.
    ///
    /// # Errors
    /// `HalError::InitFailed` if the subsystem fails, `DeviceNotFound` if no
    /// pad is connected.
    pub fn open() -> Result<Self, HalError> {
        let gilrs = Gilrs::new().map_err(|e| HalError::InitFailed(format!("gamepad: {e}")))?;
        let (id, name) = gilrs
            .gamepads()
            .find(|(_, pad)| pad.is_connected())
            .map(|(id, pad)| (id, pad.name().to_string()))
            .ok_or_else(|| HalError::DeviceNotFound("no gamepad connected".to_string()))?;
        info!(gamepad = %name, "Gamepad bound");
        Ok(Self { gilrs, id })
    }
}

impl InputDevice for GamepadInput {
    fn name(&self) -> &'static str {
        "gilrs"
    }

    fn poll_event(&mut self) -> Result<Option<InputEvent>, HalError> {
        while let Some(event) = self.gilrs.next_event() {
            if event.id != self.id {
                continue;
            }
            match event.event {
                EventType::AxisChanged(axis, value, _) => {
                    if let Some(index) = axis_index(axis) {
                        return Ok(Some(InputEvent::axis(index, axis_value(axis, value))));
                    }
                }
                EventType::Disconnected => {
                    warn!("Gamepad disconnected");
                    return Err(HalError::Unavailable("gamepad disconnected".to_string()));
                }
                other => debug!(?other, "gamepad event ignored"),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stick_layout() {
        assert_eq!(axis_index(Axis::LeftStickY), Some(1));
        assert_eq!(axis_index(Axis::RightStickX), Some(2));
        assert_eq!(axis_index(Axis::DPadX), None);
    }

    #[test]
    fn vertical_axes_are_down_positive() {
        assert_eq!(axis_value(Axis::LeftStickY, 0.5), -0.5);
        assert_eq!(axis_value(Axis::RightStickX, 0.5), 0.5);
    }
}
