//! CSS Values & Units Level 3: §6 Dimensions, generalized to compound units.
//! Spec: <https://www.w3.org/TR/css-values-3/#dimensions>
//!
//! A dimension string is a product of units with at most one division, such
//! as `px`, `px*em/cm`, or `1/s` (no dividend). Arithmetic on numbers splits
//! the string into dividend and divisor unit lists, cancels common units,
//! and serializes the remainder in canonical form (`px * em / cm`).

use core::fmt;
use core::mem;

/// Largest exponent magnitude accepted when raising a dimensioned number.
pub const MAX_DIMENSION_EXPONENT: i64 = 100;

/// Failure to interpret or combine dimension strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DimensionError {
    /// A separator was not followed or preceded by a unit.
    EmptyUnit(String),
    /// A unit token contained characters that cannot appear in a unit name.
    InvalidUnit(String),
    /// The leading `1` of a dividend-less dimension was not followed by `/`.
    MissingSlash(String),
    /// More than one `/` appeared in one dimension.
    MultipleSlashes(String),
    /// A unit appeared an odd number of times where a square was required.
    NotSquare(String),
    /// Exponent was zero or larger than [`MAX_DIMENSION_EXPONENT`].
    ExponentOutOfRange(i64),
}

impl fmt::Display for DimensionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUnit(dimension) => {
                write!(formatter, "dimension \"{dimension}\" has a missing unit.")
            }
            Self::InvalidUnit(unit) => write!(formatter, "\"{unit}\" is not a valid unit."),
            Self::MissingSlash(dimension) => write!(
                formatter,
                "dimension \"{dimension}\" starts with 1 but is not followed by \"/\"."
            ),
            Self::MultipleSlashes(dimension) => {
                write!(formatter, "dimension \"{dimension}\" has more than one \"/\".")
            }
            Self::NotSquare(dimension) => write!(
                formatter,
                "dimension \"{dimension}\" is not a square so its square root cannot be computed."
            ),
            Self::ExponentOutOfRange(exponent) => write!(
                formatter,
                "a dimensioned number can only be raised to a non-zero integer power between -{MAX_DIMENSION_EXPONENT} and {MAX_DIMENSION_EXPONENT}, not {exponent}."
            ),
        }
    }
}

/// Whether `unit` looks like an identifier (`px`, `em`, `dpcm`, `-x-foo`).
fn is_valid_unit(unit: &str) -> bool {
    unit.chars()
        .all(|character| character.is_alphanumeric() || matches!(character, '-' | '_' | '%'))
}

/// Split `dimension` into unit lists, appending to `dividend` and `divisor`.
///
/// Calling this repeatedly merges several dimensions into the same lists.
/// On error the lists keep whatever was parsed before the failure.
///
/// # Errors
/// Returns a [`DimensionError`] for empty units, invalid unit names, a
/// leading `1` without `/`, or more than one `/`.
pub fn dimensions_to_vectors(
    dimension: &str,
    dividend: &mut Vec<String>,
    divisor: &mut Vec<String>,
) -> Result<(), DimensionError> {
    let mut rest = dimension.trim();
    if rest.is_empty() {
        return Ok(());
    }
    let mut in_divisor = false;
    if let Some(after_one) = rest.strip_prefix('1') {
        let Some(after_slash) = after_one.trim_start().strip_prefix('/') else {
            return Err(DimensionError::MissingSlash(dimension.to_owned()));
        };
        rest = after_slash;
        in_divisor = true;
    }
    loop {
        let end = rest.find(['*', '/']).unwrap_or(rest.len());
        let unit = rest.get(..end).unwrap_or_default().trim();
        if unit.is_empty() {
            return Err(DimensionError::EmptyUnit(dimension.to_owned()));
        }
        if !is_valid_unit(unit) {
            return Err(DimensionError::InvalidUnit(unit.to_owned()));
        }
        if in_divisor {
            divisor.push(unit.to_owned());
        } else {
            dividend.push(unit.to_owned());
        }
        let Some(separator) = rest.get(end..=end) else {
            return Ok(());
        };
        if separator == "/" {
            if in_divisor {
                return Err(DimensionError::MultipleSlashes(dimension.to_owned()));
            }
            in_divisor = true;
        }
        rest = rest.get(end + 1..).unwrap_or_default();
    }
}

/// Serialize unit lists in canonical form.
///
/// `[px, em] / [cm]` gives `px * em / cm`; `[] / [s]` gives `1 / s`;
/// two empty lists give the empty (unitless) dimension.
pub fn rebuild_dimension(dividend: &[String], divisor: &[String]) -> String {
    let numerator = if dividend.is_empty() {
        if divisor.is_empty() {
            return String::new();
        }
        "1".to_owned()
    } else {
        dividend.join(" * ")
    };
    if divisor.is_empty() {
        return numerator;
    }
    format!("{numerator} / {}", divisor.join(" * "))
}

/// Remove units present in both lists, one instance at a time.
///
/// The dividend is walked from the end; each unit also found in the divisor
/// is dropped from both.
pub fn cancel_units(dividend: &mut Vec<String>, divisor: &mut Vec<String>) {
    let mut index = dividend.len();
    while index > 0 {
        index -= 1;
        let Some(unit) = dividend.get(index) else {
            continue;
        };
        if let Some(found) = divisor.iter().position(|candidate| candidate == unit) {
            divisor.remove(found);
            dividend.remove(index);
        }
    }
}

/// Dimension of `lhs * rhs` after cancellation.
///
/// # Errors
/// Returns a [`DimensionError`] when either side is malformed.
pub fn multiply_dimensions(lhs: &str, rhs: &str) -> Result<String, DimensionError> {
    let mut dividend = Vec::new();
    let mut divisor = Vec::new();
    dimensions_to_vectors(lhs, &mut dividend, &mut divisor)?;
    dimensions_to_vectors(rhs, &mut dividend, &mut divisor)?;
    cancel_units(&mut dividend, &mut divisor);
    Ok(rebuild_dimension(&dividend, &divisor))
}

/// Dimension of `lhs / rhs` after cancellation.
///
/// # Errors
/// Returns a [`DimensionError`] when either side is malformed.
pub fn divide_dimensions(lhs: &str, rhs: &str) -> Result<String, DimensionError> {
    let mut dividend = Vec::new();
    let mut divisor = Vec::new();
    dimensions_to_vectors(lhs, &mut dividend, &mut divisor)?;
    // rhs units cross over
    dimensions_to_vectors(rhs, &mut divisor, &mut dividend)?;
    cancel_units(&mut dividend, &mut divisor);
    Ok(rebuild_dimension(&dividend, &divisor))
}

fn repeat_units(units: &[String], count: usize) -> Vec<String> {
    let mut repeated = Vec::with_capacity(units.len() * count);
    for _ in 0..count {
        repeated.extend_from_slice(units);
    }
    repeated
}

/// Dimension of `base ** exponent`.
///
/// Both unit lists are repeated `|exponent|` times; a negative exponent
/// swaps them first.
///
/// # Errors
/// Returns [`DimensionError::ExponentOutOfRange`] for a zero exponent or one
/// larger than [`MAX_DIMENSION_EXPONENT`], or a parse error for `base`.
pub fn power_dimension(base: &str, exponent: i64) -> Result<String, DimensionError> {
    if exponent == 0 || exponent.unsigned_abs() > MAX_DIMENSION_EXPONENT.unsigned_abs() {
        return Err(DimensionError::ExponentOutOfRange(exponent));
    }
    let mut dividend = Vec::new();
    let mut divisor = Vec::new();
    dimensions_to_vectors(base, &mut dividend, &mut divisor)?;
    if exponent < 0 {
        mem::swap(&mut dividend, &mut divisor);
    }
    let count = exponent.unsigned_abs() as usize;
    Ok(rebuild_dimension(&repeat_units(&dividend, count), &repeat_units(&divisor, count)))
}

/// Keep one unit of every pair in `units`, or `None` when a unit is unpaired.
fn halve_units(units: &[String]) -> Option<Vec<String>> {
    let mut remaining = units.to_vec();
    let mut halved = Vec::with_capacity(remaining.len() / 2);
    while let Some(unit) = remaining.pop() {
        let partner = remaining.iter().position(|candidate| *candidate == unit)?;
        remaining.remove(partner);
        halved.push(unit);
    }
    halved.reverse();
    Some(halved)
}

/// Dimension of the square root of a number with unit `dimension`.
///
/// # Errors
/// Returns [`DimensionError::NotSquare`] when any unit appears an odd
/// number of times on either side, or a parse error.
pub fn sqrt_dimension(dimension: &str) -> Result<String, DimensionError> {
    let mut dividend = Vec::new();
    let mut divisor = Vec::new();
    dimensions_to_vectors(dimension, &mut dividend, &mut divisor)?;
    let not_square = || DimensionError::NotSquare(dimension.to_owned());
    let root_dividend = halve_units(&dividend).ok_or_else(not_square)?;
    let root_divisor = halve_units(&divisor).ok_or_else(not_square)?;
    Ok(rebuild_dimension(&root_dividend, &root_divisor))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "fixtures are well-formed")]
mod tests {
    use super::*;

    fn split(dimension: &str) -> (Vec<String>, Vec<String>) {
        let mut dividend = Vec::new();
        let mut divisor = Vec::new();
        dimensions_to_vectors(dimension, &mut dividend, &mut divisor).unwrap();
        (dividend, divisor)
    }

    /// Compound units split on `*` and the single `/`.
    #[test]
    fn splits_compound_dimension() {
        let (dividend, divisor) = split("px*em/cm");
        assert_eq!(dividend, ["px", "em"]);
        assert_eq!(divisor, ["cm"]);
        assert_eq!(rebuild_dimension(&dividend, &divisor), "px * em / cm");
    }

    /// `1/s` and `1 / s` carry no dividend.
    #[test]
    fn dividendless_dimension() {
        let (dividend, divisor) = split("1 / s");
        assert!(dividend.is_empty());
        assert_eq!(divisor, ["s"]);
        assert_eq!(rebuild_dimension(&dividend, &divisor), "1 / s");
        assert_eq!(split("1/s").1, ["s"]);
    }

    /// Canonical strings parse back to themselves.
    #[test]
    fn canonical_round_trip() {
        for dimension in ["px", "px * em", "px * em / cm * s", "1 / s * s"] {
            let (dividend, divisor) = split(dimension);
            assert_eq!(rebuild_dimension(&dividend, &divisor), dimension);
        }
    }

    /// Malformed strings are rejected.
    #[test]
    fn malformed_dimensions() {
        let mut dividend = Vec::new();
        let mut divisor = Vec::new();
        assert!(matches!(
            dimensions_to_vectors("px**em", &mut dividend, &mut divisor),
            Err(DimensionError::EmptyUnit(_))
        ));
        assert!(matches!(
            dimensions_to_vectors("px/em/cm", &mut Vec::new(), &mut Vec::new()),
            Err(DimensionError::MultipleSlashes(_))
        ));
        assert!(matches!(
            dimensions_to_vectors("1 px", &mut Vec::new(), &mut Vec::new()),
            Err(DimensionError::MissingSlash(_))
        ));
        // parsing stops at the failure but keeps earlier units
        assert_eq!(dividend, ["px"]);
    }

    /// Shared units cancel across multiplication and division.
    #[test]
    fn cancellation() {
        assert_eq!(multiply_dimensions("px/em", "em").unwrap(), "px");
        let squared = multiply_dimensions("px", "px").unwrap();
        assert_eq!(squared, "px * px");
        assert_eq!(divide_dimensions(&squared, "px").unwrap(), "px");
        assert_eq!(divide_dimensions("px", "").unwrap(), "px");
        assert_eq!(divide_dimensions("", "s").unwrap(), "1 / s");
        assert_eq!(divide_dimensions("px", "px").unwrap(), "");
    }

    /// Exponents repeat the unit lists; negative exponents invert them.
    #[test]
    fn powers() {
        assert_eq!(power_dimension("px", 3).unwrap(), "px * px * px");
        assert_eq!(power_dimension("px/s", -2).unwrap(), "s * s / px * px");
        assert_eq!(
            power_dimension("px", 101),
            Err(DimensionError::ExponentOutOfRange(101))
        );
        assert_eq!(power_dimension("px", 0), Err(DimensionError::ExponentOutOfRange(0)));
    }

    /// Compound units repeat as a whole.
    #[test]
    fn compound_powers() {
        assert_eq!(power_dimension("px*em", 2).unwrap(), "px * em * px * em");
        assert_eq!(power_dimension("px*em", -2).unwrap(), "1 / px * em * px * em");
    }

    /// The most negative exponent is out of range rather than overflowing.
    #[test]
    fn extreme_exponents() {
        assert_eq!(
            power_dimension("px", i64::MIN),
            Err(DimensionError::ExponentOutOfRange(i64::MIN))
        );
        assert_eq!(
            power_dimension("px", i64::MAX),
            Err(DimensionError::ExponentOutOfRange(i64::MAX))
        );
    }

    /// Square roots halve paired units and reject unpaired ones.
    #[test]
    fn square_roots() {
        assert_eq!(sqrt_dimension("px * px / s * s").unwrap(), "px / s");
        assert_eq!(sqrt_dimension("px * em * px * em").unwrap(), "px * em");
        assert!(matches!(sqrt_dimension("px"), Err(DimensionError::NotSquare(_))));
    }
}
