#![allow(
    clippy::unwrap_used,
    clippy::let_underscore_must_use,
    clippy::tests_outside_test_module,
    reason = "integration tests"
)]

mod common;

use common::reduce;
use css_expressions::Severity;
use css_values_units::{Node, NodeType};

const TOLERANCE: f64 = 1e-9;

fn channels(text: &str) -> (f64, f64, f64, f64) {
    let (value, sink) = reduce(text, None);
    assert!(!sink.has_errors(), "{text}: {:?}", sink.diagnostics());
    let value = value.unwrap();
    assert_eq!(value.node_type(), NodeType::Color);
    value.get_color().unwrap().get_rgba()
}

fn number(text: &str) -> Node {
    let (value, sink) = reduce(text, None);
    assert!(!sink.has_errors(), "{text}: {:?}", sink.diagnostics());
    value.unwrap()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < TOLERANCE
}

#[test]
fn colors_add_channel_wise() {
    let (red, green, blue, alpha) = channels("rgba(255, 0, 0, 1) + rgba(0, 255, 0, 1)");
    assert!(close(red, 1.0) && close(green, 1.0) && close(blue, 0.0) && close(alpha, 1.0));

    let (dimmed, _, _, _) = channels("#ff0000 - 0.5");
    assert!(close(dimmed, 0.5));
}

#[test]
fn constructors() {
    let (_, _, _, opaque) = channels("rgb(rgba(red, 0.5))");
    assert!(close(opaque, 1.0));

    let (_, green, _, _) = channels("hsl(120, 100%, 50%)");
    assert!(close(green, 1.0));
    let (_, _, _, alpha) = channels("hsla(1, 2, 3, 0.25)");
    assert!(close(alpha, 0.25));

    let (_, half, _, _) = channels("frgb(1, 0.5, 0)");
    assert!(close(half, 0.5));
    let (_, _, _, faded) = channels("frgba(white, 0.1)");
    assert!(close(faded, 0.1));
}

#[test]
fn accessors() {
    assert!(close(number("red(#336699)").get_decimal(), 51.0));
    assert!(close(number("blue(#336699)").get_decimal(), 153.0));
    assert!(close(number("alpha(rgba(0, 0, 0, 0.5))").get_decimal(), 0.5));

    let hue = number("hue(hsl(120, 100%, 50%))");
    assert!(close(hue.get_decimal(), 120.0));
    assert_eq!(hue.get_dimension(), "deg");
    let lightness = number("lightness(hsl(120, 100%, 50%))");
    assert_eq!(lightness.node_type(), NodeType::Percent);
    assert!(close(lightness.get_decimal(), 0.5));
}

#[test]
fn invalid_colors_are_reported() {
    let (value, sink) = reduce("#zz", None);
    assert!(value.is_none());
    assert_eq!(sink.messages(Severity::Error), ["the color in #zz is not valid."]);

    let (divided, division_sink) = reduce("red / 0", None);
    assert!(divided.is_none());
    assert_eq!(
        division_sink.messages(Severity::Error),
        ["color division does not accept a zero divisor."]
    );

    let (channel, channel_sink) = reduce("red(3)", None);
    assert!(channel.is_none());
    assert_eq!(channel_sink.messages(Severity::Error), ["red() expects a color as parameter."]);
}
