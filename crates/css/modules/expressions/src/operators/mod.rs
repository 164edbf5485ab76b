//! Binary operator appliers.
//!
//! Each applier is a pure function over two reduced operands. Failures are
//! returned as [`OperatorError`], whose `Display` text is the diagnostic the
//! evaluator reports.

mod additive;
mod comparison;
mod multiplicative;
mod power;

pub use additive::add;
pub use comparison::{MatchOperator, is_equal, is_less_than, matches};
pub use multiplicative::{MultiplicativeOperator, font_metrics, multiply};
pub use power::power;

use core::fmt;
use css_values_units::{DimensionError, Node, NodeType, format_decimal};

/// Why an operator could not be applied.
#[derive(Clone, Debug, PartialEq)]
pub enum OperatorError {
    /// The operand type pair is not supported; `operator` is the quoted
    /// operator list used in the message.
    IncompatibleTypes {
        lhs: String,
        rhs: String,
        operator: &'static str,
    },
    /// Numbers with different units were combined.
    IncompatibleDimensions {
        lhs: String,
        rhs: String,
        operator: &'static str,
    },
    DivisionByZero,
    ModuloByZero,
    /// A color channel was divided by zero.
    ColorDivisionByZero,
    /// `string * n` with a negative `n`.
    NegativeRepeat(i64),
    /// The exponent of `**` carried a unit.
    DimensionedExponent(String),
    /// A dimensioned number was raised to a non-integer power.
    FractionalExponent(f64),
    Dimension(DimensionError),
}

impl fmt::Display for OperatorError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleTypes { lhs, rhs, operator } => write!(
                formatter,
                "incompatible types between {lhs} and {rhs} for operator {operator}."
            ),
            Self::IncompatibleDimensions { lhs, rhs, operator } => write!(
                formatter,
                "incompatible dimensions (\"{lhs}\" and \"{rhs}\") for operator {operator}."
            ),
            Self::DivisionByZero => formatter.write_str("division by zero."),
            Self::ModuloByZero => formatter.write_str("modulo by zero."),
            Self::ColorDivisionByZero => {
                formatter.write_str("color division does not accept a zero divisor.")
            }
            Self::NegativeRepeat(count) => write!(
                formatter,
                "string * integer requires that the integer not be negative ({count})."
            ),
            Self::DimensionedExponent(dimension) => write!(
                formatter,
                "the number representing the power cannot be a dimension ({dimension}); it has to be unitless."
            ),
            Self::FractionalExponent(exponent) => write!(
                formatter,
                "a number with a dimension can only be raised to an integer power, not {}.",
                format_decimal(*exponent)
            ),
            Self::Dimension(error) => write!(formatter, "{error}"),
        }
    }
}

impl From<DimensionError> for OperatorError {
    fn from(error: DimensionError) -> Self {
        Self::Dimension(error)
    }
}

/// Operand description used in type errors: the type name, plus the text
/// of strings and identifiers.
pub(crate) fn describe(node: &Node) -> String {
    match node.node_type() {
        NodeType::Identifier | NodeType::String => {
            format!("{} ({})", node.node_type(), node.get_string())
        }
        other => other.name().to_owned(),
    }
}

pub(crate) fn incompatible(lhs: &Node, rhs: &Node, operator: &'static str) -> OperatorError {
    OperatorError::IncompatibleTypes {
        lhs: describe(lhs),
        rhs: describe(rhs),
        operator,
    }
}

/// Unit of a number for unit checks; percents count as `%`.
pub(crate) fn effective_dimension(node: &Node) -> &str {
    if node.is(NodeType::Percent) {
        "%"
    } else {
        node.get_dimension()
    }
}

/// Whether `node` is an INTEGER, DECIMAL_NUMBER or PERCENT.
pub(crate) fn is_numeric(node: &Node) -> bool {
    matches!(
        node.node_type(),
        NodeType::Integer | NodeType::DecimalNumber | NodeType::Percent
    )
}
