//! Data exchanged with HAL collaborators.
//!
//! - `InputEvent` - Events drained from the input device
//! - `Rgb` - Display colors

use crate::control::axis::AxisSample;

/// One event drained from the input device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// An analog axis moved.
    AxisMotion(AxisSample),
    /// The operator asked to quit (window closed, quit button).
    Quit,
}

impl InputEvent {
    /// Convenience constructor for axis motion.
    pub const fn axis(axis_id: u8, value: f64) -> Self {
        Self::AxisMotion(AxisSample::new(axis_id, value))
    }
}

/// 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as `0x00RRGGBB`.
    #[inline]
    pub const fn to_0rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_0rgb() {
        assert_eq!(Rgb::WHITE.to_0rgb(), 0x00FF_FFFF);
        assert_eq!(Rgb::BLACK.to_0rgb(), 0);
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).to_0rgb(), 0x0012_3456);
    }

    #[test]
    fn axis_event_constructor() {
        match InputEvent::axis(2, 0.5) {
            InputEvent::AxisMotion(sample) => {
                assert_eq!(sample.axis_id, 2);
                assert_eq!(sample.value, 0.5);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
