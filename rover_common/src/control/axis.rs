//! Controller axis samples and normalization.
//!
//! Controllers nominally report axis positions in [-1, 1], but drift,
//! calibration faults and driver bugs produce out-of-range or NaN values.
//! [`normalize`] is the single gate every value passes through before it
//! may reach a motor.

/// Lower bound of a normalized axis value.
pub const AXIS_MIN: f64 = -1.0;

/// Upper bound of a normalized axis value.
pub const AXIS_MAX: f64 = 1.0;

/// One reported position for one controller analog input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSample {
    /// Physical axis index as numbered by the input device.
    pub axis_id: u8,
    /// Raw reported value; may lie outside [-1, 1].
    pub value: f64,
}

impl AxisSample {
    /// Create a sample for the given physical axis.
    pub const fn new(axis_id: u8, value: f64) -> Self {
        Self { axis_id, value }
    }
}

/// Clamp a raw axis value into [-1, 1].
///
/// In-range values pass through unchanged. NaN maps to 0.0 (center) so a
/// faulty device can never command full deflection.
#[inline]
pub fn normalize(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(AXIS_MIN, AXIS_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_values_pass_through() {
        for v in [-1.0, -0.75, -0.3, 0.0, 0.25, 0.5, 1.0] {
            assert_eq!(normalize(v), v);
        }
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(normalize(1.0001), 1.0);
        assert_eq!(normalize(42.0), 1.0);
        assert_eq!(normalize(-3.5), -1.0);
        assert_eq!(normalize(f64::INFINITY), 1.0);
        assert_eq!(normalize(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn nan_centers() {
        assert_eq!(normalize(f64::NAN), 0.0);
    }

    #[test]
    fn output_always_bounded() {
        let mut v = -1000.0;
        while v <= 1000.0 {
            let n = normalize(v);
            assert!((AXIS_MIN..=AXIS_MAX).contains(&n), "normalize({v}) = {n}");
            v += 0.37;
        }
    }

    #[test]
    fn negative_zero_is_preserved_as_zero() {
        assert_eq!(normalize(-0.0), 0.0);
    }
}
