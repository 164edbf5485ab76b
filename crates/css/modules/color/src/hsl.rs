//! HSL conversions.
//! Spec: <https://www.w3.org/TR/css-color-4/#the-hsl-notation>

use crate::Color;

/// Degrees covered by one sextant of the hue circle.
const SEXTANT_DEGREES: f64 = 60.0;

/// Full hue circle.
const HUE_CIRCLE: f64 = 360.0;

impl Color {
    /// Build a color from a hue in degrees and saturation, lightness, alpha in `[0, 1]`.
    ///
    /// Hues wrap around the circle, so `-120` and `240` are the same color.
    ///
    /// Spec: <https://www.w3.org/TR/css-color-4/#hsl-to-rgb>
    pub fn from_hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);
        let chroma = (1.0 - 2.0f64.mul_add(lightness, -1.0).abs()) * saturation;
        let sextant = hue.rem_euclid(HUE_CIRCLE) / SEXTANT_DEGREES;
        let second = chroma * (1.0 - (sextant.rem_euclid(2.0) - 1.0).abs());
        let (red, green, blue) = match sextant as u8 {
            0 => (chroma, second, 0.0),
            1 => (second, chroma, 0.0),
            2 => (0.0, chroma, second),
            3 => (0.0, second, chroma),
            4 => (second, 0.0, chroma),
            _ => (chroma, 0.0, second),
        };
        let offset = (-0.5f64).mul_add(chroma, lightness);
        Self::from_rgba(red + offset, green + offset, blue + offset, alpha)
    }

    /// `(hue, saturation, lightness, alpha)` with the hue in degrees `[0, 360)`.
    ///
    /// Achromatic colors report a hue and saturation of zero.
    pub fn get_hsla(&self) -> (f64, f64, f64, f64) {
        let (red, green, blue, alpha) = self.get_rgba();
        let maximum = red.max(green).max(blue);
        let minimum = red.min(green).min(blue);
        let chroma = maximum - minimum;
        let lightness = (maximum + minimum) / 2.0;
        if chroma <= f64::EPSILON {
            return (0.0, 0.0, lightness, alpha);
        }
        let saturation = chroma / (1.0 - 2.0f64.mul_add(lightness, -1.0).abs());
        let sextant = if (maximum - red).abs() <= f64::EPSILON {
            ((green - blue) / chroma).rem_euclid(6.0)
        } else if (maximum - green).abs() <= f64::EPSILON {
            (blue - red) / chroma + 2.0
        } else {
            (red - green) / chroma + 4.0
        };
        let hue = (sextant * SEXTANT_DEGREES).rem_euclid(HUE_CIRCLE);
        (hue, saturation.clamp(0.0, 1.0), lightness, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    /// Primary hues land on the expected RGB channels.
    #[test]
    fn hsl_primaries() {
        assert_eq!(Color::from_hsla(0.0, 1.0, 0.5, 1.0).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::from_hsla(120.0, 1.0, 0.5, 1.0).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::from_hsla(-120.0, 1.0, 0.5, 1.0).to_rgba8(), [0, 0, 255, 255]);
    }

    /// Converting to HSL and back keeps the channels.
    #[test]
    fn hsl_accessor_inverts_constructor() {
        let original = Color::from_rgba8(0x33, 0x99, 0xcc, 255);
        let (hue, saturation, lightness, alpha) = original.get_hsla();
        assert_close(hue, 200.0);
        let rebuilt = Color::from_hsla(hue, saturation, lightness, alpha);
        assert_eq!(rebuilt.to_rgba8(), original.to_rgba8());
    }
}
