//! Preprocessor value expressions: reduction of tokenized declaration
//! values to single values.
//! Spec: <https://www.w3.org/TR/css-values-4/#calc-syntax> (analogue for preprocessor arithmetic)
//!
//! An [`Expression`] walks the children of a token node with a precedence
//! chain, folding every reducible span into its value: arithmetic with
//! unit tracking, comparisons, boolean logic, `? :`, lists, maps,
//! subscripts and the builtin functions. Failures are reported through a
//! [`DiagnosticSink`] and leave the offending span unreduced.
//!
//! ```text
//! 3px + 2px          -> 5px
//! (10, 20, 30)[2]    -> 20
//! if(1 > 0, a, b)    -> a
//! ```

#![forbid(unsafe_code)]

mod builtins;
mod cursor;
pub mod diagnostics;
mod evaluator;
pub mod operators;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, LogSink, Severity};
pub use evaluator::{DEFAULT_MAX_DEPTH, Expression};

use anyhow::{Context as _, Result, anyhow};
use css_syntax::tokenize;
use css_values_units::{Node, Position};
use css_variables::VariableTable;
use log::debug;

/// Tokenize `text`, substitute its `$variables` and reduce it to one value.
///
/// `variables` also answers the `*-exists()` builtins.
///
/// # Errors
/// Fails when the text cannot be tokenized, a variable is not set, or the
/// expression does not reduce to a value; the reasons for the latter are
/// in `sink`.
pub fn reduce_text(
    text: &str,
    position: &Position,
    sink: &mut dyn DiagnosticSink,
    variables: Option<&VariableTable>,
) -> Result<Node> {
    let mut tokens =
        tokenize(text, position).with_context(|| format!("cannot tokenize \"{text}\""))?;
    if let Some(table) = variables {
        table.substitute(&mut tokens)?;
    }

    let mut expression = Expression::new(sink);
    if let Some(table) = variables {
        expression.set_variable_handler(table);
    }
    let value = expression
        .reduce_single(&mut tokens, true)
        .ok_or_else(|| anyhow!("\"{text}\" does not reduce to a value"))?;
    debug!("{position}: \"{text}\" reduced to {}", value.node_type());
    Ok(value)
}
