//! CSS Values & Units Level 3: §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

/// Fractional digits kept when serializing a decimal number.
const DECIMAL_PRECISION: usize = 3;

/// Serialize a decimal with at most three fractional digits.
///
/// Trailing zeros and a dangling `.` are removed, so `2.50` prints as `2.5`
/// and `3.0` as `3`. Negative zero prints as `0`.
pub fn format_decimal(number: f64) -> String {
    let fixed = format!("{number:.DECIMAL_PRECISION$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        return "0".to_owned();
    }
    trimmed.to_owned()
}

/// The integer an integral decimal represents, or `None` when it has a fraction.
pub fn decimal_to_integer(number: f64) -> Option<i64> {
    (number.is_finite() && number.fract() == 0.0).then_some(number as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decimals keep three digits and drop trailing zeros.
    #[test]
    fn decimal_formatting() {
        assert_eq!(format_decimal(2.5), "2.5");
        assert_eq!(format_decimal(3.0), "3");
        assert_eq!(format_decimal(1.0 / 3.0), "0.333");
        assert_eq!(format_decimal(-0.0001), "0");
        assert_eq!(format_decimal(-12.125), "-12.125");
    }

    /// Only integral values convert.
    #[test]
    fn integral_decimals() {
        assert_eq!(decimal_to_integer(4.0), Some(4));
        assert_eq!(decimal_to_integer(-2.0), Some(-2));
        assert_eq!(decimal_to_integer(2.5), None);
        assert_eq!(decimal_to_integer(f64::NAN), None);
    }
}
