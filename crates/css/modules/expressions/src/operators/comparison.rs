//! Equality, ordering and attribute-style string matching.

use super::OperatorError;
use css_values_units::{Node, NodeType};

const EQUALITY_OPERATORS: &str = "'=', '!=', '<', '<=', '>', or '>='";
const ORDERING_OPERATORS: &str = "'<', '<=', '>', or '>='";

fn type_error(lhs: &Node, rhs: &Node, operator: &'static str) -> OperatorError {
    OperatorError::IncompatibleTypes {
        lhs: lhs.node_type().name().to_owned(),
        rhs: rhs.node_type().name().to_owned(),
        operator,
    }
}

/// `lhs = rhs`. Units are not compared.
///
/// # Errors
/// Only same-typed booleans, integers, decimals, percents, strings and
/// colors can be compared.
#[allow(clippy::float_cmp, reason = "the '=' operator compares values exactly")]
pub fn is_equal(lhs: &Node, rhs: &Node) -> Result<bool, OperatorError> {
    match (lhs.node_type(), rhs.node_type()) {
        (NodeType::Boolean, NodeType::Boolean) => Ok(lhs.get_boolean() == rhs.get_boolean()),
        (NodeType::Integer, NodeType::Integer) => Ok(lhs.get_integer() == rhs.get_integer()),
        (NodeType::DecimalNumber, NodeType::DecimalNumber)
        | (NodeType::Percent, NodeType::Percent) => Ok(lhs.get_decimal() == rhs.get_decimal()),
        (NodeType::String, NodeType::String) => Ok(lhs.get_string() == rhs.get_string()),
        (NodeType::Color, NodeType::Color) => Ok(lhs.get_color() == rhs.get_color()),
        _ => Err(type_error(lhs, rhs, EQUALITY_OPERATORS)),
    }
}

/// `lhs < rhs`. Colors have no ordering.
///
/// # Errors
/// Only same-typed booleans, integers, decimals, percents and strings can
/// be ordered.
pub fn is_less_than(lhs: &Node, rhs: &Node) -> Result<bool, OperatorError> {
    match (lhs.node_type(), rhs.node_type()) {
        (NodeType::Boolean, NodeType::Boolean) => Ok(!lhs.get_boolean() && rhs.get_boolean()),
        (NodeType::Integer, NodeType::Integer) => Ok(lhs.get_integer() < rhs.get_integer()),
        (NodeType::DecimalNumber, NodeType::DecimalNumber)
        | (NodeType::Percent, NodeType::Percent) => Ok(lhs.get_decimal() < rhs.get_decimal()),
        (NodeType::String, NodeType::String) => Ok(lhs.get_string() < rhs.get_string()),
        _ => Err(type_error(lhs, rhs, ORDERING_OPERATORS)),
    }
}

/// Attribute-selector style string match operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOperator {
    /// `~=`: whitespace separated word.
    Include,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
    /// `|=`: hyphen separated part.
    Dash,
}

impl MatchOperator {
    pub const fn from_node_type(node_type: NodeType) -> Option<Self> {
        match node_type {
            NodeType::IncludeMatch => Some(Self::Include),
            NodeType::PrefixMatch => Some(Self::Prefix),
            NodeType::SuffixMatch => Some(Self::Suffix),
            NodeType::SubstringMatch => Some(Self::Substring),
            NodeType::DashMatch => Some(Self::Dash),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Include => "'~='",
            Self::Prefix => "'^='",
            Self::Suffix => "'$='",
            Self::Substring => "'*='",
            Self::Dash => "'|='",
        }
    }
}

/// Whether the `lhs` string is found in `rhs` according to `operator`.
///
/// # Errors
/// Both operands must be strings.
pub fn matches(operator: MatchOperator, lhs: &Node, rhs: &Node) -> Result<bool, OperatorError> {
    if !lhs.is(NodeType::String) || !rhs.is(NodeType::String) {
        return Err(type_error(lhs, rhs, operator.symbol()));
    }
    let needle = lhs.get_string();
    let haystack = rhs.get_string();
    Ok(match operator {
        MatchOperator::Include => format!(" {haystack} ").contains(&format!(" {needle} ")),
        MatchOperator::Prefix => haystack.starts_with(needle),
        MatchOperator::Suffix => haystack.ends_with(needle),
        MatchOperator::Substring => haystack.contains(needle),
        MatchOperator::Dash => format!("-{haystack}-").contains(&format!("-{needle}-")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::Position;

    fn string(text: &str) -> Node {
        Node::text(NodeType::String, Position::default(), text)
    }

    /// Match operators look for the left operand inside the right one.
    #[test]
    fn string_matches() {
        let words = string("alpha beta gamma");
        assert_eq!(matches(MatchOperator::Include, &string("beta"), &words), Ok(true));
        assert_eq!(matches(MatchOperator::Include, &string("bet"), &words), Ok(false));
        assert_eq!(matches(MatchOperator::Prefix, &string("alpha"), &words), Ok(true));
        assert_eq!(matches(MatchOperator::Suffix, &string("gamma"), &words), Ok(true));
        assert_eq!(matches(MatchOperator::Substring, &string("a be"), &words), Ok(true));
        assert_eq!(
            matches(MatchOperator::Dash, &string("en"), &string("fr-en-us")),
            Ok(true)
        );
        assert_eq!(matches(MatchOperator::Dash, &string("e"), &string("fr-en")), Ok(false));
    }

    /// Mixed operand types cannot be compared.
    #[test]
    fn mixed_types_are_errors() {
        let position = Position::default();
        let error = is_equal(&Node::integer(position.clone(), 1), &Node::decimal(position, 1.0));
        assert_eq!(
            error.map_err(|failure| failure.to_string()),
            Err("incompatible types between INTEGER and DECIMAL_NUMBER for operator '=', '!=', '<', '<=', '>', or '>='.".to_owned())
        );
    }

    #[test]
    fn boolean_ordering() {
        let position = Position::default();
        let no = Node::boolean(position.clone(), false);
        let yes = Node::boolean(position, true);
        assert_eq!(is_less_than(&no, &yes), Ok(true));
        assert_eq!(is_less_than(&yes, &no), Ok(false));
    }
}
