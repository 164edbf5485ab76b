//! Builtin functions.
//!
//! Calls are dispatched by name through a static table holding each
//! function's arity. Handlers receive the FUNCTION node once its arguments
//! are reduced, read them through the `get_*` helpers, and report a single
//! "expects ..." error when an argument is missing or has the wrong type.

mod colors;
mod control;
mod math;
mod types;

use crate::diagnostics::Severity;
use crate::evaluator::Expression;
use css_color::Color;
use css_values_units::{Node, NodeType};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;

type Handler = fn(&mut Expression<'_>, &Node) -> Option<Node>;

struct Builtin {
    name: &'static str,
    min: usize,
    max: usize,
    handler: Handler,
}

const fn builtin(name: &'static str, min: usize, max: usize, handler: Handler) -> Builtin {
    Builtin {
        name,
        min,
        max,
        handler,
    }
}

const UNBOUNDED: usize = usize::MAX;

static BUILTINS: [Builtin; 42] = [
    builtin("abs", 1, 1, math::abs),
    builtin("acos", 1, 1, math::acos),
    builtin("alpha", 1, 1, colors::alpha),
    builtin("asin", 1, 1, math::asin),
    builtin("atan", 1, 1, math::atan),
    builtin("blue", 1, 1, colors::blue),
    builtin("ceil", 1, 1, math::ceil),
    builtin("cos", 1, 1, math::cos),
    builtin("decimal-number", 1, 1, types::decimal_number),
    builtin("floor", 1, 1, math::floor),
    builtin("frgb", 1, 3, colors::frgb),
    builtin("frgba", 2, 4, colors::frgba),
    builtin("function-exists", 1, 1, control::function_exists),
    builtin("global-variable-exists", 1, 1, control::global_variable_exists),
    builtin("green", 1, 1, colors::green),
    builtin("hsl", 3, 3, colors::hsl),
    builtin("hsla", 4, 4, colors::hsla),
    builtin("hue", 1, 1, colors::hue),
    builtin("identifier", 1, 1, types::identifier),
    builtin("if", 3, 3, control::if_else),
    builtin("inspect", 1, 1, types::inspect),
    builtin("integer", 1, 1, types::integer),
    builtin("lightness", 1, 1, colors::lightness),
    builtin("log", 1, 1, math::log),
    builtin("max", 1, UNBOUNDED, math::max),
    builtin("min", 1, UNBOUNDED, math::min),
    builtin("not", 1, 1, control::not),
    builtin("random", 0, 0, math::random),
    builtin("red", 1, 1, colors::red),
    builtin("rgb", 1, 3, colors::rgb),
    builtin("rgba", 2, 4, colors::rgba),
    builtin("round", 1, 1, math::round),
    builtin("saturation", 1, 1, colors::saturation),
    builtin("sign", 1, 1, math::sign),
    builtin("sin", 1, 1, math::sin),
    builtin("sqrt", 1, 1, math::sqrt),
    builtin("str-length", 1, 1, types::str_length),
    builtin("string", 1, 1, types::string),
    builtin("tan", 1, 1, math::tan),
    builtin("type-of", 1, 1, types::type_of),
    builtin("unit", 1, 1, types::unit),
    builtin("variable-exists", 1, 1, control::variable_exists),
];

static INDEX: Lazy<HashMap<&'static str, &'static Builtin>> =
    Lazy::new(|| BUILTINS.iter().map(|entry| (entry.name, entry)).collect());

/// Lookup key of a function name: case-insensitive, `_` same as `-`.
fn normalize(name: &str) -> String {
    name.to_ascii_lowercase().replace('_', "-")
}

/// Whether `name` is a builtin function.
pub fn is_builtin(name: &str) -> bool {
    INDEX.contains_key(normalize(name).as_str())
}

/// Run the builtin named by `function`, or return it unchanged when it is
/// not one.
pub fn call(expression: &mut Expression<'_>, function: Node) -> Option<Node> {
    let Some(entry) = INDEX.get(normalize(function.get_string()).as_str()) else {
        debug!("{}() is not a builtin, keeping it", function.get_string());
        return Some(function);
    };

    let count = function.child_count();
    if count < entry.min || count > entry.max {
        let expected = if entry.min == entry.max {
            format!(
                "exactly {} parameter{}.",
                entry.min,
                if entry.min == 1 { "" } else { "s" }
            )
        } else if entry.max == UNBOUNDED {
            format!("at least {} parameter{}.", entry.min, if entry.min == 1 { "" } else { "s" })
        } else {
            format!("between {} and {} parameters.", entry.min, entry.max)
        };
        return expects(expression, &function, &expected);
    }

    debug!("calling {}() with {count} argument(s)", entry.name);
    (entry.handler)(expression, &function)
}

/// Report "`name`() expects `what`" at the call and return no result.
fn expects(expression: &mut Expression<'_>, function: &Node, what: &str) -> Option<Node> {
    let message = format!("{}() expects {what}", function.get_string());
    expression.report(Severity::Error, function.position(), &message);
    None
}

/// The value of argument `index` when it reduced to exactly one node.
fn get_any(function: &Node, index: usize) -> Option<&Node> {
    match function.child(index)?.children() {
        [value] => Some(value),
        _ => None,
    }
}

fn get_color(function: &Node, index: usize) -> Option<Color> {
    get_any(function, index)?.get_color()
}

/// An INTEGER or DECIMAL_NUMBER argument and its value.
fn get_number(function: &Node, index: usize) -> Option<(&Node, f64)> {
    let value = get_any(function, index)?;
    match value.node_type() {
        NodeType::Integer | NodeType::DecimalNumber => Some((value, value.get_number()?)),
        _ => None,
    }
}

/// Like [`get_number`], also accepting a PERCENT (as its fraction).
fn get_number_or_percent(function: &Node, index: usize) -> Option<(&Node, f64)> {
    let value = get_any(function, index)?;
    match value.node_type() {
        NodeType::Integer | NodeType::DecimalNumber | NodeType::Percent => {
            Some((value, value.get_number()?))
        }
        _ => None,
    }
}

fn get_string(function: &Node, index: usize) -> Option<&str> {
    get_any(function, index)
        .filter(|value| value.is(NodeType::String))
        .map(Node::get_string)
}

fn get_string_or_identifier(function: &Node, index: usize) -> Option<&str> {
    get_any(function, index)
        .filter(|value| value.is(NodeType::String) || value.is(NodeType::Identifier))
        .map(Node::get_string)
}
