//! Type conversion and inspection builtins.

use super::{expects, get_any, get_number_or_percent, get_string};
use crate::evaluator::Expression;
use crate::operators::effective_dimension;
use css_syntax::tokenize;
use css_values_units::{Node, NodeType};

const ONE_VALUE: &str = "one value as parameter.";
const NUMERIC_TEXT: &str =
    "a string parameter to represent a valid integer, decimal number, or percent value.";

/// Text of `value` for `string()` and `identifier()`; `None` for
/// containers and other values without a textual form.
fn text_of(value: &Node) -> Option<String> {
    match value.node_type() {
        NodeType::Color | NodeType::DecimalNumber | NodeType::Integer | NodeType::Percent => {
            Some(value.to_css_string(false))
        }
        NodeType::Exclamation
        | NodeType::Hash
        | NodeType::Identifier
        | NodeType::String
        | NodeType::Url => Some(value.get_string().to_owned()),
        _ => None,
    }
}

fn convert_text(
    expression: &mut Expression<'_>,
    function: &Node,
    node_type: NodeType,
) -> Option<Node> {
    let Some((value, text)) = get_any(function, 0).and_then(|any| Some((any, text_of(any)?))) else {
        return expects(expression, function, ONE_VALUE);
    };
    Some(Node::text(node_type, value.position().clone(), text))
}

pub fn string(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    convert_text(expression, function, NodeType::String)
}

pub fn identifier(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    convert_text(expression, function, NodeType::Identifier)
}

/// The argument serialized with quotes, as a string.
pub fn inspect(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let Some(value) = get_any(function, 0) else {
        return expects(expression, function, ONE_VALUE);
    };
    Some(Node::text(
        NodeType::String,
        value.position().clone(),
        value.to_css_string(true),
    ))
}

/// The first number token of textual `value`, read with the tokenizer.
fn lex_number(value: &Node) -> Option<Node> {
    let tokens = tokenize(value.get_string(), value.position()).ok()?;
    tokens
        .children()
        .iter()
        .find(|token| !token.is(NodeType::Whitespace))
        .filter(|token| {
            matches!(
                token.node_type(),
                NodeType::Integer | NodeType::DecimalNumber | NodeType::Percent
            )
        })
        .cloned()
}

const fn is_textual(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Exclamation
            | NodeType::Hash
            | NodeType::Identifier
            | NodeType::String
            | NodeType::Url
    )
}

/// Truncate a number to an INTEGER. Percents keep their percentage and
/// lose the `%` (`integer(12.5%)` is `12`).
fn truncate(number: &Node) -> Node {
    let position = number.position().clone();
    match number.node_type() {
        NodeType::Integer => number.clone(),
        NodeType::Percent => Node::integer(position, (number.get_decimal() * 100.0).trunc() as i64),
        _ => Node::integer(position, number.get_decimal().trunc() as i64)
            .with_dimension(number.get_dimension()),
    }
}

/// Widen a number to a DECIMAL_NUMBER; decimals and percents are kept.
fn widen(number: &Node) -> Node {
    if number.is(NodeType::Integer) {
        Node::decimal(number.position().clone(), number.get_integer() as f64)
            .with_dimension(number.get_dimension())
    } else {
        number.clone()
    }
}

/// Shared body of `integer()` and `decimal-number()`: numbers convert
/// directly, text is read as a number first.
fn convert_number(
    expression: &mut Expression<'_>,
    function: &Node,
    convert: fn(&Node) -> Node,
) -> Option<Node> {
    let Some(value) = get_any(function, 0) else {
        return expects(expression, function, ONE_VALUE);
    };
    match value.node_type() {
        NodeType::Integer | NodeType::DecimalNumber | NodeType::Percent => Some(convert(value)),
        node_type if is_textual(node_type) => match lex_number(value) {
            Some(number) => Some(convert(&number)),
            None => expects(expression, function, NUMERIC_TEXT),
        },
        _ => expects(expression, function, ONE_VALUE),
    }
}

pub fn integer(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    convert_number(expression, function, truncate)
}

pub fn decimal_number(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    convert_number(expression, function, widen)
}

/// Name of the argument's type.
pub fn type_of(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let Some(value) = get_any(function, 0) else {
        return expects(expression, function, "one parameter with one value.");
    };
    let name = match value.node_type() {
        NodeType::Array | NodeType::List => "list",
        NodeType::Boolean => "bool",
        NodeType::Color => "color",
        NodeType::DecimalNumber | NodeType::Percent => "number",
        NodeType::Identifier => "identifier",
        NodeType::Integer => "integer",
        NodeType::Map => "map",
        NodeType::String => "string",
        NodeType::UnicodeRange => "unicode-range",
        _ => "undefined",
    };
    Some(Node::text(NodeType::String, function.position().clone(), name))
}

/// The unit of a number as a string; `%` for percents.
pub fn unit(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let Some((number, _)) = get_number_or_percent(function, 0) else {
        return expects(expression, function, "a number as parameter.");
    };
    Some(Node::text(
        NodeType::String,
        function.position().clone(),
        effective_dimension(number),
    ))
}

/// Length in characters, not bytes.
pub fn str_length(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let Some(text) = get_string(function, 0) else {
        return expects(expression, function, "one string as parameter.");
    };
    Some(Node::integer(
        function.position().clone(),
        text.chars().count() as i64,
    ))
}
