//! CSS Color Module Level 4: Color values used by the expression evaluator.
//! Spec: <https://www.w3.org/TR/css-color-4/>
//!
//! `Color` is an opaque value type: four channels normalized to `[0, 1]`,
//! readable as RGBA or HSLA and rebuilt through constructors.

#![forbid(unsafe_code)]

mod hsl;
mod parse;

pub use parse::hex_value;

/// Scale between a normalized channel and its 8-bit representation.
const CHANNEL_MAX: f64 = 255.0;

/// An RGBA color whose channels are clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

/// Clamp a channel into `[0, 1]`; NaN collapses to zero.
#[inline]
fn clamp_channel(channel: f64) -> f64 {
    if channel.is_nan() {
        return 0.0;
    }
    channel.clamp(0.0, 1.0)
}

/// Basic color keywords that serialize shorter than their hex form.
///
/// Spec: <https://www.w3.org/TR/css-color-4/#named-colors>
const SHORT_NAMES: [(u32, &str); 12] = [
    (0x00c0_c0c0, "silver"),
    (0x0080_8080, "gray"),
    (0x0080_0000, "maroon"),
    (0x00ff_0000, "red"),
    (0x0080_0080, "purple"),
    (0x0000_8000, "green"),
    (0x0000_ff00, "lime"),
    (0x0080_8000, "olive"),
    (0x0000_0080, "navy"),
    (0x0000_00ff, "blue"),
    (0x0000_8080, "teal"),
    (0x0000_ffff, "aqua"),
];

impl Color {
    /// Build a color from normalized RGBA channels. Out of range channels are clamped.
    pub fn from_rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
            alpha: clamp_channel(alpha),
        }
    }

    /// Build a color from 8-bit RGBA channels.
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::from_rgba(
            f64::from(red) / CHANNEL_MAX,
            f64::from(green) / CHANNEL_MAX,
            f64::from(blue) / CHANNEL_MAX,
            f64::from(alpha) / CHANNEL_MAX,
        )
    }

    /// Normalized `(red, green, blue, alpha)` channels.
    pub const fn get_rgba(&self) -> (f64, f64, f64, f64) {
        (self.red, self.green, self.blue, self.alpha)
    }

    /// Channels rounded to 8 bits, as written in hex and `rgba()` notations.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
            .map(|channel| (channel * CHANNEL_MAX).round() as u8)
    }

    /// Same channels with a different alpha.
    #[must_use]
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self::from_rgba(self.red, self.green, self.blue, alpha)
    }

    /// True when any channel (alpha included) is non-zero.
    pub fn is_non_zero(&self) -> bool {
        self.to_rgba8().iter().any(|channel| *channel != 0)
    }

    /// Shortest CSS serialization of this color.
    ///
    /// Opaque colors prefer a basic keyword, then `#rgb`, then `#rrggbb`.
    /// Translucent colors use `rgba()`; all-zero is `transparent`.
    ///
    /// Spec: <https://www.w3.org/TR/css-color-4/#serializing-sRGB-values>
    pub fn to_css_string(&self) -> String {
        let [red, green, blue, alpha] = self.to_rgba8();
        if alpha == u8::MAX {
            let packed = (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue);
            if let Some((_, name)) = SHORT_NAMES.iter().find(|(value, _)| *value == packed) {
                return (*name).to_owned();
            }
            let nibbles_repeat = [red, green, blue]
                .iter()
                .all(|channel| (channel >> 4) == (channel & 0x0f));
            if nibbles_repeat {
                return format!("#{:x}{:x}{:x}", red & 0x0f, green & 0x0f, blue & 0x0f);
            }
            return format!("#{red:02x}{green:02x}{blue:02x}");
        }
        if red == 0 && green == 0 && blue == 0 && alpha == 0 {
            return "transparent".to_owned();
        }
        let alpha_text = format!("{:.2}", f64::from(alpha) / CHANNEL_MAX);
        let alpha_trimmed = alpha_text.trim_end_matches('0').trim_end_matches('.');
        let alpha_display = alpha_trimmed.strip_prefix("0.").map_or_else(
            || alpha_trimmed.to_owned(),
            |fraction| format!(".{fraction}"),
        );
        format!("rgba({red},{green},{blue},{alpha_display})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Channels outside the unit interval are clamped at construction.
    #[test]
    fn channels_are_clamped() {
        let color = Color::from_rgba(1.5, -0.25, 0.5, 2.0);
        assert_eq!(color.get_rgba(), (1.0, 0.0, 0.5, 1.0));
    }

    /// Serialization prefers keywords, then short hex, then long hex.
    #[test]
    fn serializes_shortest_form() {
        assert_eq!(Color::from_rgba8(255, 0, 0, 255).to_css_string(), "red");
        assert_eq!(Color::from_rgba8(0x11, 0x22, 0x33, 255).to_css_string(), "#123");
        assert_eq!(Color::from_rgba8(0x12, 0x34, 0x56, 255).to_css_string(), "#123456");
        assert_eq!(Color::from_rgba8(0, 0, 0, 0).to_css_string(), "transparent");
        assert_eq!(Color::from_rgba8(255, 0, 0, 128).to_css_string(), "rgba(255,0,0,.5)");
    }
}
