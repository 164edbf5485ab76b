#![allow(
    clippy::unwrap_used,
    clippy::let_underscore_must_use,
    clippy::tests_outside_test_module,
    reason = "integration tests"
)]

mod common;

use common::reduce;
use css_expressions::Severity;
use css_values_units::NodeType;

fn truth(text: &str) -> bool {
    let (value, sink) = reduce(text, None);
    assert!(!sink.has_errors(), "{text}: {:?}", sink.diagnostics());
    let value = value.unwrap();
    assert_eq!(value.node_type(), NodeType::Boolean);
    value.get_boolean()
}

#[test]
fn ordering() {
    assert!(truth("1 < 2"));
    assert!(!truth("2 < 1"));
    assert!(truth("3 > 2"));
    assert!(!truth("2 > 2"));
    assert!(truth("2 >= 2"));
    assert!(!truth("1 >= 2"));
}

/// `<=` needs `<` and `=` at once.
#[test]
fn less_equal_is_never_true() {
    assert!(!truth("1 <= 2"));
    assert!(!truth("2 <= 2"));
    assert!(!truth("3 <= 2"));
}

#[test]
fn equality_and_logic() {
    assert!(truth("1px = 1px"));
    assert!(truth("1 != 2"));
    assert!(truth("\"a\" not-equal \"b\""));
    assert!(truth("1 < 2 && 2 < 3"));
    assert!(truth("false || 1 = 1"));
    assert!(!truth("true and false"));
    assert!(truth("false or true"));
}

#[test]
fn double_equal_warns() {
    let (value, sink) = reduce("1 == 1", None);
    assert!(value.unwrap().get_boolean());
    assert!(!sink.has_errors());
    assert_eq!(
        sink.messages(Severity::Warning),
        ["we accepted '==' instead of '=' in an expression, you probably want to change the operator to just '='."]
    );
}

#[test]
fn logic_requires_booleans() {
    let (value, sink) = reduce("true && a", None);
    assert!(value.is_none());
    assert_eq!(sink.messages(Severity::Error), ["a boolean expression was expected."]);
}

/// Both branches are reduced; the failing one only matters when chosen.
#[test]
fn conditional_reports_the_unused_branch() {
    let (value, sink) = reduce("true ? 1 : (1 / 0)", None);
    assert_eq!(value.unwrap().get_integer(), 1);
    assert_eq!(sink.messages(Severity::Error), ["division by zero."]);

    let (chosen, clean) = reduce("1 > 2 ? 10px : 20px", None);
    let chosen = chosen.unwrap();
    assert_eq!(chosen.get_integer(), 20);
    assert_eq!(chosen.get_dimension(), "px");
    assert!(!clean.has_errors());
}

#[test]
fn conditional_needs_a_colon() {
    let (value, sink) = reduce("true ? 1", None);
    assert!(value.is_none());
    assert_eq!(
        sink.messages(Severity::Error),
        ["a mandatory ':' was expected after a '?' first expression."]
    );
}

/// The left operand is looked up inside the right one.
#[test]
fn string_match_operators() {
    assert!(truth("\"b\" ~= \"a b c\""));
    assert!(!truth("\"b\" ~= \"abc\""));
    assert!(truth("\"en\" |= \"en-US\""));
    assert!(truth("\"pre\" ^= \"prefix\""));
    assert!(!truth("\"z\" ^= \"prefix\""));
    assert!(truth("\"fix\" $= \"suffix\""));
    assert!(truth("\"str\" *= \"substring\""));
}
