//! Color constructors and channel accessors.

use super::{expects, get_color, get_number, get_number_or_percent};
use crate::evaluator::Expression;
use css_color::Color;
use css_values_units::{AngleUnit, Node, Position};

const COLOR: &str = "a color as parameter.";

/// Scale of the `rgb()`/`rgba()` channel arguments.
const BYTE_CHANNEL: f64 = 255.0;

fn color_node(function: &Node, color: Color) -> Node {
    Node::color(function.position().clone(), color)
}

/// `red, green, blue` numbers from the first three arguments, divided by
/// `scale`.
fn channels(function: &Node, scale: f64) -> Option<(f64, f64, f64)> {
    let (_, red) = get_number(function, 0)?;
    let (_, green) = get_number(function, 1)?;
    let (_, blue) = get_number(function, 2)?;
    Some((red / scale, green / scale, blue / scale))
}

/// `f(color)` forces an opaque alpha; `f(red, green, blue)` builds a color.
fn opaque(function: &Node, scale: f64) -> Option<Node> {
    if let Some(color) = get_color(function, 0) {
        return Some(color_node(function, color.with_alpha(1.0)));
    }
    let (red, green, blue) = channels(function, scale)?;
    Some(color_node(function, Color::from_rgba(red, green, blue, 1.0)))
}

/// `f(color, alpha)` replaces the alpha; `f(red, green, blue, alpha)`
/// builds a color.
fn translucent(function: &Node, scale: f64) -> Option<Node> {
    if let (Some(color), Some((_, alpha))) = (get_color(function, 0), get_number(function, 1)) {
        return Some(color_node(function, color.with_alpha(alpha)));
    }
    let (red, green, blue) = channels(function, scale)?;
    let (_, alpha) = get_number(function, 3)?;
    Some(color_node(function, Color::from_rgba(red, green, blue, alpha)))
}

pub fn rgb(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    opaque(function, BYTE_CHANNEL).or_else(|| {
        expects(
            expression,
            function,
            "exactly one color parameter or three numbers (Red, Green, Blue).",
        )
    })
}

pub fn rgba(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    translucent(function, BYTE_CHANNEL).or_else(|| {
        expects(
            expression,
            function,
            "exactly one color parameter followed by alpha or four numbers (Red, Green, Blue, Alpha).",
        )
    })
}

pub fn frgb(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    opaque(function, 1.0).or_else(|| {
        expects(
            expression,
            function,
            "exactly one color parameter or three numbers (Red, Green, Blue).",
        )
    })
}

pub fn frgba(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    translucent(function, 1.0).or_else(|| {
        expects(
            expression,
            function,
            "exactly one color parameter followed by one number (Alpha), or four numbers (Red, Green, Blue, Alpha).",
        )
    })
}

/// Hue in degrees from an angle; unitless hues are degrees already.
fn hue_degrees(function: &Node, index: usize) -> Option<f64> {
    let (number, value) = get_number(function, index)?;
    AngleUnit::from_dimension(number.get_dimension()).map(|unit| unit.to_degrees(value))
}

/// Hue, saturation and lightness from the first three arguments.
fn hsl_components(function: &Node) -> Option<(f64, f64, f64)> {
    let hue = hue_degrees(function, 0)?;
    let (_, saturation) = get_number_or_percent(function, 1)?;
    let (_, lightness) = get_number_or_percent(function, 2)?;
    Some((hue, saturation, lightness))
}

pub fn hsl(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let Some((hue, saturation, lightness)) = hsl_components(function) else {
        return expects(
            expression,
            function,
            "exactly three numbers represent Hue (angle), Saturation (%), and Lightness (%).",
        );
    };
    Some(color_node(function, Color::from_hsla(hue, saturation, lightness, 1.0)))
}

pub fn hsla(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    let components = hsl_components(function).zip(get_number(function, 3));
    let Some(((hue, saturation, lightness), (_, alpha))) = components else {
        return expects(
            expression,
            function,
            "exactly four numbers: Hue (angle), saturation (%), lightness (%), alpha (0.0 to 1.0).",
        );
    };
    Some(color_node(function, Color::from_hsla(hue, saturation, lightness, alpha)))
}

/// One component of the color in the first argument.
fn component(
    expression: &mut Expression<'_>,
    function: &Node,
    extract: fn(Color, Position) -> Node,
) -> Option<Node> {
    let Some(color) = get_color(function, 0) else {
        return expects(expression, function, COLOR);
    };
    Some(extract(color, function.position().clone()))
}

pub fn red(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    component(expression, function, |color, position| {
        Node::decimal(position, color.get_rgba().0 * BYTE_CHANNEL)
    })
}

pub fn green(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    component(expression, function, |color, position| {
        Node::decimal(position, color.get_rgba().1 * BYTE_CHANNEL)
    })
}

pub fn blue(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    component(expression, function, |color, position| {
        Node::decimal(position, color.get_rgba().2 * BYTE_CHANNEL)
    })
}

pub fn alpha(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    component(expression, function, |color, position| Node::decimal(position, color.get_rgba().3))
}

pub fn hue(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    component(expression, function, |color, position| {
        Node::decimal(position, color.get_hsla().0).with_dimension("deg")
    })
}

pub fn saturation(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    component(expression, function, |color, position| Node::percent(position, color.get_hsla().1))
}

pub fn lightness(expression: &mut Expression<'_>, function: &Node) -> Option<Node> {
    component(expression, function, |color, position| Node::percent(position, color.get_hsla().2))
}
