#![allow(
    clippy::unwrap_used,
    clippy::let_underscore_must_use,
    clippy::tests_outside_test_module,
    reason = "integration tests"
)]

mod common;

use common::{position, reduce};
use css_expressions::Severity;
use css_values_units::{Node, NodeType};
use css_variables::VariableTable;

fn value_of(text: &str) -> Node {
    let (value, sink) = reduce(text, None);
    assert!(!sink.has_errors(), "{text}: {:?}", sink.diagnostics());
    value.unwrap()
}

fn error_of(text: &str) -> String {
    let (value, sink) = reduce(text, None);
    assert!(value.is_none(), "{text} should not reduce");
    let messages = sink.messages(Severity::Error);
    assert_eq!(messages.len(), 1, "{text}: {messages:?}");
    messages[0].to_owned()
}

#[test]
fn if_selects_a_branch() {
    assert_eq!(value_of("if(1 > 0, \"yes\", \"no\")").get_string(), "yes");
    assert_eq!(value_of("if(0, \"yes\", \"no\")").get_string(), "no");

    let spread = value_of("if(true, 1px solid, none)");
    assert_eq!(spread.node_type(), NodeType::List);
    assert_eq!(spread.child_count(), 2);
}

#[test]
fn arity_is_checked() {
    assert_eq!(error_of("rgba(1, 2, 3, 4, 5)"), "rgba() expects between 2 and 4 parameters.");
    assert_eq!(error_of("abs(1, 2)"), "abs() expects exactly 1 parameter.");
    assert_eq!(error_of("if(true, 1)"), "if() expects exactly 3 parameters.");
    assert_eq!(error_of("max()"), "max() expects at least 1 parameter.");
}

#[test]
fn argument_types_are_checked() {
    assert_eq!(
        error_of("rgba(1, 2, 3)"),
        "rgba() expects exactly one color parameter followed by alpha or four numbers (Red, Green, Blue, Alpha)."
    );
    assert_eq!(error_of("abs(\"x\")"), "abs() expects a number as parameter.");
    assert_eq!(error_of("str-length(3)"), "str-length() expects one string as parameter.");
    assert_eq!(
        error_of("cos(3px)"),
        "trigonometry functions expect an angle (deg, grad, rad, turn) as a parameter."
    );
}

#[test]
fn math_keeps_units() {
    let rounded = value_of("round(2.6px)");
    assert!((rounded.get_decimal() - 3.0).abs() < f64::EPSILON);
    assert_eq!(rounded.get_dimension(), "px");

    assert_eq!(value_of("abs(-3)").get_integer(), 3);
    assert_eq!(value_of("sign(-3)").get_integer(), -1);
    assert_eq!(value_of("floor(3)").node_type(), NodeType::DecimalNumber);
    assert!((value_of("sign(-2.5)").get_decimal() + 1.0).abs() < f64::EPSILON);

    let largest = value_of("max(1px, 3px, 2px)");
    assert_eq!(largest.get_integer(), 3);
    assert_eq!(largest.get_dimension(), "px");
    assert_eq!(value_of("min(4, 2.5, 3)").node_type(), NodeType::DecimalNumber);

    let root = value_of("sqrt(4px * 4px)");
    assert!((root.get_decimal() - 4.0).abs() < f64::EPSILON);
    assert_eq!(root.get_dimension(), "px");

    assert!(value_of("cos(0deg)").get_decimal() > 0.999);
    assert_eq!(value_of("atan(1)").get_dimension(), "rad");
}

#[test]
fn random_is_a_fraction() {
    for _ in 0..16 {
        let fraction = value_of("random()").get_decimal();
        assert!((0.0..1.0).contains(&fraction));
    }
}

#[test]
fn type_inspection() {
    assert_eq!(value_of("type-of(3px)").get_string(), "integer");
    assert_eq!(value_of("type-of(1.5)").get_string(), "number");
    assert_eq!(value_of("type-of(\"a\")").get_string(), "string");
    assert_eq!(value_of("type-of(red)").get_string(), "color");
    assert_eq!(value_of("type-of(true)").get_string(), "bool");
    assert_eq!(value_of("unit(3em)").get_string(), "em");
    assert_eq!(value_of("unit(50%)").get_string(), "%");
    assert_eq!(value_of("str-length(\"héllo\")").get_integer(), 5);
    assert_eq!(value_of("inspect(\"a\")").get_string(), "\"a\"");
}

#[test]
fn conversions() {
    let parsed = value_of("integer(\"12\")");
    assert_eq!(parsed.node_type(), NodeType::Integer);
    assert_eq!(parsed.get_integer(), 12);
    assert_eq!(value_of("integer(7.9px)").get_integer(), 7);
    assert_eq!(value_of("integer(12.5%)").get_integer(), 12);

    let widened = value_of("decimal-number(3)");
    assert_eq!(widened.node_type(), NodeType::DecimalNumber);
    assert!((widened.get_decimal() - 3.0).abs() < f64::EPSILON);

    assert_eq!(value_of("string(bold)").node_type(), NodeType::String);
    assert_eq!(value_of("identifier(\"bold\")").node_type(), NodeType::Identifier);
    assert_eq!(
        error_of("integer(\"abc\")"),
        "integer() expects a string parameter to represent a valid integer, decimal number, or percent value."
    );
}

#[test]
fn names_are_normalized() {
    assert_eq!(value_of("STR_LENGTH(\"ab\")").get_integer(), 2);
    assert_eq!(error_of("Abs()"), "Abs() expects exactly 1 parameter.");
}

#[test]
fn unknown_functions_pass_through() {
    let call = value_of("translate(1px + 2px, 0)");
    assert_eq!(call.node_type(), NodeType::Function);
    assert_eq!(call.get_string(), "translate");
    assert_eq!(call.child(0).unwrap().child(0).unwrap().get_integer(), 3);
}

#[test]
fn definition_checks() {
    let mut variables = VariableTable::new();
    variables.set_global_variable("accent", Node::text(NodeType::Identifier, position(), "red"));
    variables.push_scope();
    variables.set_variable("gutter", Node::integer(position(), 8).with_dimension("px"));
    variables.set_function("double", vec![Node::text(NodeType::Identifier, position(), "value")]);

    let exists = |text: &str| {
        let (value, sink) = reduce(text, Some(&variables));
        assert!(!sink.has_errors(), "{text}: {:?}", sink.diagnostics());
        value.unwrap().get_boolean()
    };
    assert!(exists("variable-exists(gutter)"));
    assert!(exists("variable-exists(\"accent\")"));
    assert!(!exists("global-variable-exists(gutter)"));
    assert!(exists("global-variable-exists(accent)"));
    assert!(exists("function-exists(rgb)"));
    assert!(!exists("function-exists(double)"));
    assert!(!exists("function-exists(nothing)"));
    assert!(!exists("not(true)"));

    let (value, sink) = reduce("variable-exists(\"\")", Some(&variables));
    assert!(value.is_none());
    assert_eq!(
        sink.messages(Severity::Error),
        ["variable-exists() expects a string or an identifier as parameter."]
    );
}
