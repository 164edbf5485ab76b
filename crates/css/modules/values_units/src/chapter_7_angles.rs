//! CSS Values & Units Level 3: §7.1 Angle Units
//! Spec: <https://www.w3.org/TR/css-values-3/#angles>

use core::f64::consts::PI;

/// Units accepted for `<angle>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Gradians,
    Radians,
    Turns,
}

impl AngleUnit {
    /// Unit for a dimension string. Unitless numbers count as degrees.
    pub fn from_dimension(dimension: &str) -> Option<Self> {
        match dimension.to_ascii_lowercase().as_str() {
            "" | "deg" => Some(Self::Degrees),
            "grad" => Some(Self::Gradians),
            "rad" => Some(Self::Radians),
            "turn" => Some(Self::Turns),
            _ => None,
        }
    }

    /// Convert `value` in this unit to radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value.to_radians(),
            Self::Gradians => value * PI / 200.0,
            Self::Radians => value,
            Self::Turns => value * 2.0 * PI,
        }
    }

    /// Convert `value` in this unit to degrees.
    pub fn to_degrees(self, value: f64) -> f64 {
        self.to_radians(value).to_degrees()
    }
}

/// Radians for a number with unit `dimension`, or `None` when it is not an angle.
pub fn angle_to_radians(value: f64, dimension: &str) -> Option<f64> {
    AngleUnit::from_dimension(dimension).map(|unit| unit.to_radians(value))
}
