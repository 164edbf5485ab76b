//! `**` (also spelled `pow`).

use super::{OperatorError, incompatible, is_numeric};
use css_values_units::{Node, NodeType, decimal_to_integer, power_dimension};

/// `lhs ** rhs`.
///
/// The exponent must be a unitless number. A dimensioned base requires an
/// integral exponent whose magnitude is bounded, and its unit is raised
/// along with the value (`2px ** 2` is `4px * px`). The result is a
/// decimal, or a percent for a percent base.
///
/// # Errors
/// Returns an [`OperatorError`] for non-numeric operands, a dimensioned
/// exponent, or an exponent the base's unit cannot be raised to.
pub fn power(lhs: &Node, rhs: &Node) -> Result<Node, OperatorError> {
    if !matches!(rhs.node_type(), NodeType::Integer | NodeType::DecimalNumber) || !is_numeric(lhs) {
        return Err(incompatible(lhs, rhs, "'**'"));
    }
    if !rhs.get_dimension().is_empty() {
        return Err(OperatorError::DimensionedExponent(
            rhs.get_dimension().to_owned(),
        ));
    }
    let (Some(base), Some(exponent)) = (lhs.get_number(), rhs.get_number()) else {
        return Err(incompatible(lhs, rhs, "'**'"));
    };

    let position = lhs.position().clone();
    if lhs.is(NodeType::Percent) {
        return Ok(Node::percent(position, base.powf(exponent)));
    }

    let dimension = lhs.get_dimension();
    let dimension = if dimension.is_empty() {
        String::new()
    } else {
        let integral =
            decimal_to_integer(exponent).ok_or(OperatorError::FractionalExponent(exponent))?;
        power_dimension(dimension, integral)?
    };
    Ok(Node::decimal(position, base.powf(exponent)).with_dimension(dimension))
}
