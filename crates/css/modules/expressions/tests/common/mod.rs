use css_expressions::{CollectingSink, reduce_text};
use css_values_units::{Node, Position};
use css_variables::VariableTable;

pub fn position() -> Position {
    Position::new("test.scss", 1)
}

/// Reduce `text` to one value, returning it with the diagnostics it raised.
pub fn reduce(text: &str, variables: Option<&VariableTable>) -> (Option<Node>, CollectingSink) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut sink = CollectingSink::default();
    let value = reduce_text(text, &position(), &mut sink, variables).ok();
    (value, sink)
}
