//! `*`, `/` and `%` (also spelled `mul`, `div`, `mod`).

use super::{OperatorError, incompatible, is_numeric};
use css_color::Color;
use css_values_units::{Node, NodeType, divide_dimensions, multiply_dimensions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultiplicativeOperator {
    Multiply,
    Divide,
    Modulo,
}

impl MultiplicativeOperator {
    /// Operator for a token: the symbol tags or the `mul`/`div`/`mod` words.
    pub fn from_node(node: &Node) -> Option<Self> {
        match node.node_type() {
            NodeType::Multiply => Some(Self::Multiply),
            NodeType::Divide => Some(Self::Divide),
            NodeType::Modulo => Some(Self::Modulo),
            NodeType::Identifier => match node.get_string() {
                "mul" => Some(Self::Multiply),
                "div" => Some(Self::Divide),
                "mod" => Some(Self::Modulo),
                _ => None,
            },
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Multiply => "'*'",
            Self::Divide => "'/'",
            Self::Modulo => "'%'",
        }
    }
}

/// `string * n` repeats the string; either operand order is accepted.
fn repeat_string(
    operator: MultiplicativeOperator,
    text: &Node,
    count: &Node,
) -> Result<Node, OperatorError> {
    if operator != MultiplicativeOperator::Multiply {
        return Err(incompatible(text, count, "'/' or '%'"));
    }
    let times = count.get_integer();
    let Ok(times) = usize::try_from(times) else {
        return Err(OperatorError::NegativeRepeat(times));
    };
    Ok(Node::text(
        NodeType::String,
        text.position().clone(),
        text.get_string().repeat(times),
    ))
}

fn unicode_ranges(
    operator: MultiplicativeOperator,
    lhs: &Node,
    rhs: &Node,
) -> Result<Node, OperatorError> {
    if operator != MultiplicativeOperator::Multiply {
        return Err(incompatible(lhs, rhs, operator.symbol()));
    }
    let position = lhs.position().clone();
    match (lhs.get_unicode_range(), rhs.get_unicode_range()) {
        (Some(left), Some(right)) => Ok(left
            .intersect(right)
            .map_or_else(|| Node::null(position.clone()), |range| {
                Node::unicode_range(position.clone(), range)
            })),
        // null * range stays null so chained intersections can fail softly
        _ => Ok(Node::null(position)),
    }
}

type Channels = [f64; 4];

fn color_channels(node: &Node) -> Option<Channels> {
    if let Some(color) = node.get_color() {
        let (red, green, blue, alpha) = color.get_rgba();
        return Some([red, green, blue, alpha]);
    }
    match node.node_type() {
        NodeType::Integer | NodeType::DecimalNumber if node.get_dimension().is_empty() => {
            let value = node.get_number()?;
            Some([value; 4])
        }
        _ => None,
    }
}

fn colors(operator: MultiplicativeOperator, lhs: &Node, rhs: &Node) -> Result<Node, OperatorError> {
    let (Some(left), Some(right)) = (color_channels(lhs), color_channels(rhs)) else {
        return Err(incompatible(lhs, rhs, operator.symbol()));
    };
    let mut channels = [0.0; 4];
    for ((channel, first), second) in channels.iter_mut().zip(left).zip(right) {
        *channel = match operator {
            MultiplicativeOperator::Multiply => first * second,
            MultiplicativeOperator::Divide => {
                if second == 0.0 {
                    return Err(OperatorError::ColorDivisionByZero);
                }
                first / second
            }
            MultiplicativeOperator::Modulo => {
                return Err(incompatible(lhs, rhs, operator.symbol()));
            }
        };
    }
    let [red, green, blue, alpha] = channels;
    Ok(Node::color(
        lhs.position().clone(),
        Color::from_rgba(red, green, blue, alpha),
    ))
}

/// Type of the product of two numbers.
fn numeric_result_type(lhs: NodeType, rhs: NodeType) -> NodeType {
    match (lhs, rhs) {
        (NodeType::Integer, NodeType::Integer) => NodeType::Integer,
        (NodeType::Percent, NodeType::Percent) => NodeType::DecimalNumber,
        (NodeType::Percent, _) | (_, NodeType::Percent) => NodeType::Percent,
        _ => NodeType::DecimalNumber,
    }
}

fn numbers(operator: MultiplicativeOperator, lhs: &Node, rhs: &Node) -> Result<Node, OperatorError> {
    let (Some(left), Some(right)) = (lhs.get_number(), rhs.get_number()) else {
        return Err(incompatible(lhs, rhs, operator.symbol()));
    };
    if right == 0.0 {
        return Err(match operator {
            MultiplicativeOperator::Modulo => OperatorError::ModuloByZero,
            _ => OperatorError::DivisionByZero,
        });
    }

    let lhs_dimension = lhs.get_dimension();
    let rhs_dimension = rhs.get_dimension();
    let dimension = match operator {
        MultiplicativeOperator::Multiply => multiply_dimensions(lhs_dimension, rhs_dimension)?,
        MultiplicativeOperator::Divide => divide_dimensions(lhs_dimension, rhs_dimension)?,
        MultiplicativeOperator::Modulo => {
            if lhs_dimension != rhs_dimension {
                return Err(OperatorError::IncompatibleDimensions {
                    lhs: lhs_dimension.to_owned(),
                    rhs: rhs_dimension.to_owned(),
                    operator: operator.symbol(),
                });
            }
            lhs_dimension.to_owned()
        }
    };

    let position = lhs.position().clone();
    let mut result_type = numeric_result_type(lhs.node_type(), rhs.node_type());
    if result_type == NodeType::Percent && !dimension.is_empty() {
        // 50% * 10px is 5px
        result_type = NodeType::DecimalNumber;
    }

    let node = match result_type {
        NodeType::Integer => {
            let (first, second) = (lhs.get_integer(), rhs.get_integer());
            let value = match operator {
                MultiplicativeOperator::Multiply => first.wrapping_mul(second),
                MultiplicativeOperator::Divide => first.wrapping_div(second),
                MultiplicativeOperator::Modulo => first.wrapping_rem(second),
            };
            Node::integer(position, value)
        }
        _ => {
            let value = match operator {
                MultiplicativeOperator::Multiply => left * right,
                MultiplicativeOperator::Divide => left / right,
                MultiplicativeOperator::Modulo => left % right,
            };
            if result_type == NodeType::Percent {
                Node::percent(position, value)
            } else {
                Node::decimal(position, value)
            }
        }
    };
    Ok(node.with_dimension(dimension))
}

/// `lhs * rhs`, `lhs / rhs` or `lhs % rhs`.
///
/// Units combine through the dimension algebra (`px/em * em` is `px`);
/// modulo requires equal units. Strings repeat under `*`, unicode ranges
/// intersect, and colors scale channel-wise.
///
/// # Errors
/// Returns an [`OperatorError`] for unsupported operand types, a zero
/// divisor, a negative repeat count, or malformed units.
pub fn multiply(
    operator: MultiplicativeOperator,
    lhs: &Node,
    rhs: &Node,
) -> Result<Node, OperatorError> {
    match (lhs.node_type(), rhs.node_type()) {
        (NodeType::String, NodeType::Integer) => repeat_string(operator, lhs, rhs),
        (NodeType::Integer, NodeType::String) => repeat_string(operator, rhs, lhs),
        (NodeType::UnicodeRange, NodeType::UnicodeRange | NodeType::Null)
        | (NodeType::Null, NodeType::UnicodeRange) => unicode_ranges(operator, lhs, rhs),
        (NodeType::Color, _) | (_, NodeType::Color) => colors(operator, lhs, rhs),
        _ if is_numeric(lhs) && is_numeric(rhs) => numbers(operator, lhs, rhs),
        _ => Err(incompatible(lhs, rhs, operator.symbol())),
    }
}

/// The `font` shorthand's `size/line-height` pair.
///
/// The result is a FONT_METRICS node whose two children are the font size
/// and the line height as written.
///
/// # Errors
/// Both operands must be numbers.
pub fn font_metrics(lhs: &Node, rhs: &Node) -> Result<Node, OperatorError> {
    if !is_numeric(lhs) || !is_numeric(rhs) {
        return Err(incompatible(lhs, rhs, "'/'"));
    }
    Ok(Node::container(
        NodeType::FontMetrics,
        lhs.position().clone(),
        vec![lhs.clone(), rhs.clone()],
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "operands are valid")]
mod tests {
    use super::*;
    use css_values_units::{Position, UnicodeRange};

    fn number(value: i64, dimension: &str) -> Node {
        Node::integer(Position::default(), value).with_dimension(dimension)
    }

    /// Units cancel between dividend and divisor.
    #[test]
    fn units_cancel() {
        let speed = Node::decimal(Position::default(), 3.0).with_dimension("px/em");
        let product = multiply(MultiplicativeOperator::Multiply, &speed, &number(2, "em")).unwrap();
        assert_eq!(product.get_dimension(), "px");
        assert!((product.get_decimal() - 6.0).abs() < 1e-12);
    }

    /// Integer division truncates and modulo keeps the sign of the dividend.
    #[test]
    fn integer_division() {
        let quotient = multiply(MultiplicativeOperator::Divide, &number(-7, ""), &number(2, "")).unwrap();
        assert_eq!(quotient.get_integer(), -3);
        let remainder = multiply(MultiplicativeOperator::Modulo, &number(-7, ""), &number(2, "")).unwrap();
        assert_eq!(remainder.get_integer(), -1);
        assert_eq!(
            multiply(MultiplicativeOperator::Modulo, &number(1, ""), &number(0, "")),
            Err(OperatorError::ModuloByZero)
        );
    }

    #[test]
    fn string_repeat() {
        let text = Node::text(NodeType::String, Position::default(), "ab");
        let repeated = multiply(MultiplicativeOperator::Multiply, &number(3, ""), &text).unwrap();
        assert_eq!(repeated.get_string(), "ababab");
        assert_eq!(
            multiply(MultiplicativeOperator::Multiply, &text, &number(-1, "")),
            Err(OperatorError::NegativeRepeat(-1))
        );
    }

    /// Disjoint ranges intersect to null.
    #[test]
    fn range_intersection() {
        let range = |start, end| Node::unicode_range(Position::default(), UnicodeRange::new(start, end));
        let overlap = multiply(MultiplicativeOperator::Multiply, &range(0x10, 0x40), &range(0x30, 0x80)).unwrap();
        assert_eq!(overlap.get_unicode_range(), Some(UnicodeRange::new(0x30, 0x40)));
        let none = multiply(MultiplicativeOperator::Multiply, &range(0x10, 0x20), &range(0x30, 0x40)).unwrap();
        assert!(none.is(NodeType::Null));
    }

    /// A color divided by a zero channel is refused.
    #[test]
    fn color_division_by_zero() {
        let red = Node::color(Position::default(), Color::from_rgba(1.0, 0.0, 0.0, 1.0));
        assert_eq!(
            multiply(MultiplicativeOperator::Divide, &red, &red),
            Err(OperatorError::ColorDivisionByZero)
        );
    }
}
