//! Conditionals and definition checks.

use super::{expects, get_any, get_string_or_identifier, is_builtin};
use crate::evaluator::Expression;
use css_values_units::{Node, NodeType};

/// `if(condition, when_true, when_false)`. A branch of several values is
/// returned as a LIST.
pub fn if_else(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let Some(condition) = get_any(function, 0) else {
        return expects(expression, function, "a boolean as its first argument.");
    };
    let branch = if expression.boolean(condition)? { 1 } else { 2 };
    let chosen = function.child(branch)?;
    let mut values: Vec<Node> = chosen
        .children()
        .iter()
        .filter(|value| !value.is(NodeType::Whitespace))
        .cloned()
        .collect();
    if values.len() == 1 {
        return values.pop();
    }
    Some(Node::container(NodeType::List, chosen.position().clone(), values))
}

pub fn not(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let Some(value) = get_any(function, 0) else {
        return expects(expression, function, "a boolean as its first argument.");
    };
    let truth = expression.boolean(value)?;
    Some(Node::boolean(function.position().clone(), !truth))
}

/// Whether the global definition of the named argument has one of
/// `node_types`. Without a variable handler nothing is defined.
fn defined(
    expression: &mut Expression<'_>,
    function: &Node,
    global_only: bool,
    node_types: &[NodeType],
) -> Option<bool> {
    let Some(name) = get_string_or_identifier(function, 0).filter(|name| !name.is_empty()) else {
        expects(expression, function, "a string or an identifier as parameter.");
        return None;
    };
    let found = expression
        .variable_handler()
        .and_then(|variables| variables.get_variable(name, global_only))
        .is_some_and(|definition| node_types.contains(&definition.node_type()));
    Some(found)
}

pub fn function_exists(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let user_defined = defined(
        expression,
        function,
        true,
        &[NodeType::VariableFunction, NodeType::Function],
    )?;
    let builtin = get_string_or_identifier(function, 0).is_some_and(is_builtin);
    Some(Node::boolean(function.position().clone(), user_defined || builtin))
}

pub fn variable_exists(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let found = defined(
        expression,
        function,
        false,
        &[NodeType::Variable, NodeType::Identifier],
    )?;
    Some(Node::boolean(function.position().clone(), found))
}

pub fn global_variable_exists(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let found = defined(
        expression,
        function,
        true,
        &[NodeType::Variable, NodeType::Identifier],
    )?;
    Some(Node::boolean(function.position().clone(), found))
}
