//! Hex and keyword color parsing.
//! Spec: <https://www.w3.org/TR/css-color-4/#hex-notation>

use crate::Color;
use csscolorparser::Color as ParsedColor;

/// Bit count used to duplicate a single hex nibble into a full byte.
const NIBBLE_SHIFT: u32 = 4;

/// Convert an ASCII hex digit to its numeric value.
pub const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Expand `digits` hex characters into 8-bit channels.
///
/// Short forms (3 or 4 digits) duplicate each nibble.
fn hex_channels(digits: &[u8]) -> Option<[u8; 4]> {
    let nibbles = digits
        .iter()
        .map(|byte_val| hex_value(*byte_val))
        .collect::<Option<Vec<u8>>>()?;
    let mut channels = [u8::MAX; 4];
    match nibbles.len() {
        3 | 4 => {
            for (slot, nibble) in channels.iter_mut().zip(&nibbles) {
                *slot = nibble.wrapping_shl(NIBBLE_SHIFT) | nibble;
            }
        }
        6 | 8 => {
            for (slot, pair) in channels.iter_mut().zip(nibbles.chunks_exact(2)) {
                let [high, low] = pair else { return None };
                *slot = high.wrapping_shl(NIBBLE_SHIFT) | low;
            }
        }
        _ => return None,
    }
    Some(channels)
}

impl Color {
    /// Parse the digits of a hex color (without the leading `#`).
    ///
    /// Accepts 3, 4, 6 or 8 hex digits.
    pub fn from_hex(digits: &str) -> Option<Self> {
        let [red, green, blue, alpha] = hex_channels(digits.as_bytes())?;
        Some(Self::from_rgba8(red, green, blue, alpha))
    }

    /// Look up a CSS color keyword such as `red` or `transparent`.
    ///
    /// Only alphabetic identifiers qualify, and words made solely of hex
    /// digits (`add`, `fade`) are never treated as colors.
    ///
    /// Spec: <https://www.w3.org/TR/css-color-4/#named-colors>
    pub fn from_name(name: &str) -> Option<Self> {
        if name.is_empty()
            || !name.bytes().all(|byte_val| byte_val.is_ascii_alphabetic())
            || name.bytes().all(|byte_val| hex_value(byte_val).is_some())
        {
            return None;
        }
        let parsed: ParsedColor = name.to_ascii_lowercase().parse().ok()?;
        let [red, green, blue, alpha] = parsed.to_rgba8();
        Some(Self::from_rgba8(red, green, blue, alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Short and long hex forms expand to the same channels.
    #[test]
    fn hex_forms() {
        assert_eq!(Color::from_hex("abc").map(|color| color.to_rgba8()), Some([0xaa, 0xbb, 0xcc, 0xff]));
        assert_eq!(
            Color::from_hex("aabbcc80").map(|color| color.to_rgba8()),
            Some([0xaa, 0xbb, 0xcc, 0x80])
        );
        assert_eq!(Color::from_hex("abcde"), None);
        assert_eq!(Color::from_hex("xyz"), None);
    }

    /// Keywords resolve case-insensitively; hex-looking words do not.
    #[test]
    fn named_colors() {
        assert_eq!(Color::from_name("Red").map(|color| color.to_rgba8()), Some([255, 0, 0, 255]));
        assert_eq!(
            Color::from_name("rebeccapurple").map(|color| color.to_rgba8()),
            Some([0x66, 0x33, 0x99, 0xff])
        );
        assert_eq!(Color::from_name("fade"), None);
        assert_eq!(Color::from_name("bold"), None);
    }
}
