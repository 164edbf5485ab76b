//! Numeric builtins.

use super::{expects, get_number, get_number_or_percent};
use crate::diagnostics::Severity;
use crate::evaluator::Expression;
use core::sync::atomic::{AtomicU64, Ordering};
use css_values_units::{Node, NodeType, Value, angle_to_radians, sqrt_dimension};
use once_cell::sync::Lazy;
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

const NUMBER: &str = "a number as parameter.";

/// Apply `integer` or `decimal` to the number in the first argument,
/// keeping its unit. Integers stay integers only when `integer` is given.
fn round_with(
    expression: &mut Expression<'_>,
    function: &Node,
    integer: Option<fn(i64) -> i64>,
    decimal: fn(f64) -> f64,
) -> Option<Node> {
    let Some((number, value)) = get_number(function, 0) else {
        return expects(expression, function, NUMBER);
    };
    let mut result = number.clone();
    match integer {
        Some(apply) if number.is(NodeType::Integer) => {
            result.set_value(Value::Integer(apply(number.get_integer())));
        }
        _ if number.is(NodeType::Integer) => {
            result = Node::decimal(number.position().clone(), decimal(value))
                .with_dimension(number.get_dimension());
        }
        _ => result.set_value(Value::Decimal(decimal(value))),
    }
    Some(result)
}

pub fn abs(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    round_with(expression, function, Some(i64::wrapping_abs), f64::abs)
}

pub fn ceil(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    round_with(expression, function, None, f64::ceil)
}

pub fn floor(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    round_with(expression, function, None, f64::floor)
}

pub fn round(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    round_with(expression, function, None, f64::round)
}

pub fn sign(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    round_with(expression, function, Some(i64::signum), |decimal| {
        if decimal > 0.0 {
            1.0
        } else if decimal < 0.0 {
            -1.0
        } else {
            0.0
        }
    })
}

/// Unitless decimal result of `apply` over the first argument.
fn unitless(
    expression: &mut Expression<'_>,
    function: &Node,
    apply: fn(f64) -> f64,
) -> Option<Node> {
    let Some((_, value)) = get_number(function, 0) else {
        return expects(expression, function, NUMBER);
    };
    Some(Node::decimal(function.position().clone(), apply(value)))
}

pub fn log(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    unitless(expression, function, f64::ln)
}

/// Inverse trigonometry; the result is in radians.
fn inverse(expression: &mut Expression<'_>, function: &Node, apply: fn(f64) -> f64) -> Option<Node> {
    unitless(expression, function, apply).map(|angle| angle.with_dimension("rad"))
}

pub fn acos(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    inverse(expression, function, f64::acos)
}

pub fn asin(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    inverse(expression, function, f64::asin)
}

pub fn atan(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    inverse(expression, function, f64::atan)
}

/// Trigonometry over an angle; unitless values are degrees.
fn trigonometry(expression: &mut Expression<'_>, function: &Node, apply: fn(f64) -> f64) -> Option<Node> {
    let Some((number, value)) = get_number(function, 0) else {
        return expects(expression, function, NUMBER);
    };
    let Some(radians) = angle_to_radians(value, number.get_dimension()) else {
        expression.report(
            Severity::Error,
            function.position(),
            "trigonometry functions expect an angle (deg, grad, rad, turn) as a parameter.",
        );
        return None;
    };
    Some(Node::decimal(function.position().clone(), apply(radians)))
}

pub fn cos(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    trigonometry(expression, function, f64::cos)
}

pub fn sin(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    trigonometry(expression, function, f64::sin)
}

pub fn tan(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    trigonometry(expression, function, f64::tan)
}

/// The unit must be a square (`px * px`) and is halved with the value.
pub fn sqrt(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let Some((number, value)) = get_number(function, 0) else {
        return expects(expression, function, NUMBER);
    };
    match sqrt_dimension(number.get_dimension()) {
        Ok(dimension) => {
            Some(Node::decimal(function.position().clone(), value.sqrt()).with_dimension(dimension))
        }
        Err(error) => {
            expression.report(Severity::Error, function.position(), &error.to_string());
            None
        }
    }
}

/// The argument holding the extreme value according to `better`.
fn extremum(
    expression: &mut Expression<'_>,
    function: &Node,
    better: fn(f64, f64) -> bool,
) -> Option<Node> {
    let mut best: Option<(&Node, f64)> = None;
    for index in 0..function.child_count() {
        let Some((number, value)) = get_number_or_percent(function, index) else {
            return expects(expression, function, "numbers or percents as parameters.");
        };
        if best.is_none_or(|(_, current)| better(value, current)) {
            best = Some((number, value));
        }
    }
    best.map(|(number, _)| number.clone())
}

pub fn max(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    extremum(expression, function, |value, current| value > current)
}

pub fn min(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    extremum(expression, function, |value, current| value < current)
}

/// Process-wide xorshift state, seeded once per process.
static RANDOM_STATE: Lazy<AtomicU64> = Lazy::new(|| {
    let seed = RandomState::new().hash_one(0u8);
    AtomicU64::new(seed | 1)
});

const fn xorshift(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

/// A decimal in `[0, 1)`.
pub fn random(_expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let previous = RANDOM_STATE
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |state| Some(xorshift(state)))
        .unwrap_or_else(|state| state);
    // 53 high bits fill the mantissa exactly
    let fraction = (xorshift(previous) >> 11) as f64 / (1u64 << 53) as f64;
    Some(Node::decimal(function.position().clone(), fraction))
}
