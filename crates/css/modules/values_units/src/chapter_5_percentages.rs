//! CSS Values & Units Level 3: §5 Percentages
//! Spec: <https://www.w3.org/TR/css-values-3/#percentages>

use crate::chapter_4_numbers::format_decimal;

/// Serialize a percent stored as a fraction (`0.5` prints as `50%`).
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", format_decimal(fraction * 100.0))
}
