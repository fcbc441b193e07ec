//! Bounded actuation commands.

use crate::control::axis::normalize;

/// The (steer, throttle) pair handed to the motor actuator.
///
/// Fields are private: every constructor normalizes, so a command that
/// exists is always within [-1, 1] on both channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActuationCommand {
    steer: f64,
    throttle: f64,
}

impl ActuationCommand {
    /// Both channels centered.
    pub const STOP: Self = Self {
        steer: 0.0,
        throttle: 0.0,
    };

    /// Build a command from raw values, clamping each into [-1, 1].
    pub fn new(steer: f64, throttle: f64) -> Self {
        Self {
            steer: normalize(steer),
            throttle: normalize(throttle),
        }
    }

    /// Steering set-point in [-1, 1].
    #[inline]
    pub const fn steer(&self) -> f64 {
        self.steer
    }

    /// Throttle set-point in [-1, 1].
    #[inline]
    pub const fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Whether both channels are centered.
    #[inline]
    pub fn is_stop(&self) -> bool {
        self.steer == 0.0 && self.throttle == 0.0
    }
}
