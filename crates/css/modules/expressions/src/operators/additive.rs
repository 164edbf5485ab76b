//! `+` and `-`.

use super::{OperatorError, effective_dimension, incompatible, is_numeric};
use css_color::Color;
use css_values_units::{Node, NodeType};

type Channels = (f64, f64, f64, f64);

/// Raw channels of a color, or a unitless scalar spread over all four.
fn channels(node: &Node) -> Option<Channels> {
    if let Some(color) = node.get_color() {
        return Some(color.get_rgba());
    }
    match node.node_type() {
        NodeType::Integer | NodeType::DecimalNumber if node.get_dimension().is_empty() => {
            let value = node.get_number()?;
            Some((value, value, value, value))
        }
        _ => None,
    }
}

/// Channel-wise sum of two colors, or of a color and a scalar offset.
/// The result is clamped when the color is rebuilt.
fn apply_color(lhs: &Node, rhs: &Node, subtract: bool) -> Option<Node> {
    let (lhs_red, lhs_green, lhs_blue, lhs_alpha) = channels(lhs)?;
    let (rhs_red, rhs_green, rhs_blue, rhs_alpha) = channels(rhs)?;
    let sign: f64 = if subtract { -1.0 } else { 1.0 };
    let color = Color::from_rgba(
        sign.mul_add(rhs_red, lhs_red),
        sign.mul_add(rhs_green, lhs_green),
        sign.mul_add(rhs_blue, lhs_blue),
        sign.mul_add(rhs_alpha, lhs_alpha),
    );
    Some(Node::color(lhs.position().clone(), color))
}

/// `lhs + rhs`, or `lhs - rhs` when `subtract` is set.
///
/// Strings concatenate. Numbers must carry the same unit; integers stay
/// integers, any decimal makes the result a decimal, and two percents give
/// a percent. Colors combine channel-wise with colors, or with a unitless
/// scalar applied to every channel.
///
/// # Errors
/// Returns an [`OperatorError`] for unsupported operand types, string
/// subtraction, and mismatched units.
pub fn add(lhs: &Node, rhs: &Node, subtract: bool) -> Result<Node, OperatorError> {
    let operator = if subtract { "'-'" } else { "'+'" };
    let position = lhs.position().clone();

    if lhs.is(NodeType::String) && rhs.is(NodeType::String) {
        if subtract {
            return Err(incompatible(lhs, rhs, operator));
        }
        let joined = format!("{}{}", lhs.get_string(), rhs.get_string());
        return Ok(Node::text(NodeType::String, position, joined));
    }

    if lhs.is(NodeType::Color) || rhs.is(NodeType::Color) {
        return apply_color(lhs, rhs, subtract).ok_or_else(|| incompatible(lhs, rhs, operator));
    }

    if !is_numeric(lhs) || !is_numeric(rhs) {
        return Err(incompatible(lhs, rhs, operator));
    }
    let lhs_dimension = effective_dimension(lhs);
    let rhs_dimension = effective_dimension(rhs);
    if lhs_dimension != rhs_dimension {
        return Err(OperatorError::IncompatibleDimensions {
            lhs: lhs_dimension.to_owned(),
            rhs: rhs_dimension.to_owned(),
            operator,
        });
    }

    let result = match (lhs.node_type(), rhs.node_type()) {
        (NodeType::Integer, NodeType::Integer) => {
            let (left, right) = (lhs.get_integer(), rhs.get_integer());
            let sum = if subtract {
                left.wrapping_sub(right)
            } else {
                left.wrapping_add(right)
            };
            Node::integer(position, sum).with_dimension(lhs.get_dimension())
        }
        (NodeType::Percent, NodeType::Percent) => {
            let (left, right) = (lhs.get_decimal(), rhs.get_decimal());
            Node::percent(position, if subtract { left - right } else { left + right })
        }
        _ => {
            let (Some(left), Some(right)) = (lhs.get_number(), rhs.get_number()) else {
                return Err(incompatible(lhs, rhs, operator));
            };
            let sum = if subtract { left - right } else { left + right };
            Node::decimal(position, sum).with_dimension(lhs.get_dimension())
        }
    };
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "operands are valid")]
mod tests {
    use super::*;
    use css_values_units::Position;

    fn px(value: i64) -> Node {
        Node::integer(Position::default(), value).with_dimension("px")
    }

    /// Integers with the same unit keep both their type and unit.
    #[test]
    fn same_unit_integers() {
        let sum = add(&px(3), &px(2), false).unwrap();
        assert!(sum.is(NodeType::Integer));
        assert_eq!(sum.get_integer(), 5);
        assert_eq!(sum.get_dimension(), "px");
    }

    #[test]
    fn mismatched_units() {
        let em = Node::integer(Position::default(), 1).with_dimension("em");
        assert_eq!(
            add(&px(1), &em, true).unwrap_err().to_string(),
            "incompatible dimensions (\"px\" and \"em\") for operator '-'."
        );
    }

    /// Subtracting strings is not defined.
    #[test]
    fn string_subtraction() {
        let left = Node::text(NodeType::String, Position::default(), "ab");
        let right = Node::text(NodeType::String, Position::default(), "cd");
        assert_eq!(add(&left, &right, false).unwrap().get_string(), "abcd");
        assert_eq!(
            add(&left, &right, true).unwrap_err().to_string(),
            "incompatible types between STRING (ab) and STRING (cd) for operator '-'."
        );
    }

    /// A mixed integer and decimal sum is a decimal.
    #[test]
    fn integer_plus_decimal() {
        let sum = add(&Node::integer(Position::default(), 1), &Node::decimal(Position::default(), 0.5), false)
            .unwrap();
        assert!(sum.is(NodeType::DecimalNumber));
        assert!((sum.get_decimal() - 1.5).abs() < 1e-12);
    }
}
