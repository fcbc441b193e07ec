//! Temperature readings and display units.

use serde::{Deserialize, Serialize};

/// Unit the panel displays temperatures in.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    #[default]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius value into this unit.
    #[inline]
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Short suffix used on the panel.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

/// One decoded probe record.
///
/// `valid == false` means the conversion was still in flight (or the record
/// was malformed); the value field is meaningless in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureReading {
    /// Raw device value in thousandths of a degree Celsius.
    pub celsius_millidegrees: i32,
    /// Whether the record carried a completed conversion.
    pub valid: bool,
}

impl TemperatureReading {
    /// Reading for a record whose conversion has not completed.
    pub const NOT_READY: Self = Self {
        celsius_millidegrees: 0,
        valid: false,
    };

    /// A completed reading.
    pub const fn ready(celsius_millidegrees: i32) -> Self {
        Self {
            celsius_millidegrees,
            valid: true,
        }
    }

    /// Value in degrees Celsius.
    #[inline]
    pub fn celsius(&self) -> f64 {
        f64::from(self.celsius_millidegrees) / 1000.0
    }

    /// Value converted to `unit`.
    #[inline]
    pub fn in_unit(&self, unit: TemperatureUnit) -> f64 {
        unit.from_celsius(self.celsius())
    }
}
