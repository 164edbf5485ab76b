//! Recursive-descent reduction of token lists.
//!
//! Precedence, loosest first: list and map, assignment, `? :`, `||`,
//! `&&`, equality and string matching, ordering, `+ -`, `* / %`, `**`,
//! subscripts, then unary tokens, groups and function calls.
//!
//! Every level returns `None` after reporting a diagnostic; the caller
//! stops reducing that sub-expression and leaves the rest of the tree as
//! written.

mod arithmetic;
mod comparison;
mod conditional;
mod list;
mod unary;

use crate::cursor::Cursor;
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::operators::OperatorError;
use core::fmt;
use core::mem;
use css_values_units::{Node, NodeType, Position};
use css_variables::VariableLookup;
use log::{debug, trace};
use std::collections::HashMap;

/// Nesting limit used unless [`Expression::set_max_depth`] says otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Evaluation context for one or more expressions.
///
/// Locals assigned with `:=` live as long as the context, so a host that
/// reduces several declarations with the same context shares them.
pub struct Expression<'ctx> {
    sink: &'ctx mut dyn DiagnosticSink,
    variables: Option<&'ctx dyn VariableLookup>,
    locals: HashMap<String, Node>,
    divide_font_metrics: bool,
    max_depth: usize,
    depth: usize,
}

impl<'ctx> Expression<'ctx> {
    /// A context reporting to `sink`, with no variable handler.
    pub fn new(sink: &'ctx mut dyn DiagnosticSink) -> Self {
        Self {
            sink,
            variables: None,
            locals: HashMap::new(),
            divide_font_metrics: false,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
        }
    }

    /// Install the lookup used by the `*-exists()` builtins.
    pub fn set_variable_handler(&mut self, variables: &'ctx dyn VariableLookup) {
        self.variables = Some(variables);
    }

    pub fn variable_handler(&self) -> Option<&'ctx dyn VariableLookup> {
        self.variables
    }

    /// Treat a top-level `a / b` between numbers as the `font` shorthand's
    /// size and line height instead of a division.
    pub fn set_divide_font_metrics(&mut self, divide_font_metrics: bool) {
        self.divide_font_metrics = divide_font_metrics;
    }

    pub const fn divide_font_metrics(&self) -> bool {
        self.divide_font_metrics
    }

    /// Limit on nested groups, subscripts, function arguments and signs.
    ///
    /// Every level runs the whole precedence chain, so large limits can
    /// exhaust the thread's stack before the limit is reached.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// A local assigned with `name := value` earlier in this context.
    pub fn local(&self, name: &str) -> Option<&Node> {
        self.locals.get(name)
    }

    /// Forward a diagnostic to the sink.
    pub fn report(&mut self, severity: Severity, position: &Position, message: &str) {
        self.sink.emit(severity, position, message);
    }

    /// Reduce the children of `node` to a single value.
    ///
    /// On success the children are replaced by the value, which is also
    /// returned. Tokens left after the expression are an error.
    pub fn reduce_single(&mut self, node: &mut Node, skip_whitespace: bool) -> Option<Node> {
        if node.is_empty() {
            let position = node.position().clone();
            self.error(&position, "an empty expression cannot be reduced.");
            return None;
        }
        let mut cursor = Cursor::new(node, skip_whitespace);
        cursor.mark_start();
        cursor.start();
        let result = self.assignment(&mut cursor)?;
        if !cursor.current().is(NodeType::Eof) {
            let leftover = cursor.current().clone();
            self.error(
                leftover.position(),
                format_args!(
                    "unexpected {} token after the end of the expression.",
                    leftover.node_type()
                ),
            );
            return None;
        }
        cursor.collapse(Some(result))
    }

    /// Reduce every item of a whitespace-separated list in place.
    ///
    /// Items that fail are left as written and the others are still
    /// reduced; the reduced node is returned only when all of them
    /// succeeded. `!flag` tokens are removed and recorded as flags on
    /// `node`.
    pub fn reduce_list(&mut self, node: &mut Node, skip_whitespace: bool) -> Option<Node> {
        let reduced = {
            let mut cursor = Cursor::new(node, skip_whitespace);
            self.compile_list(&mut cursor)
        };
        debug!(
            "reduced list of {} item(s) at {}: {}",
            node.child_count(),
            node.position(),
            if reduced { "ok" } else { "failed" }
        );
        reduced.then(|| node.clone())
    }

    fn compile_list(&mut self, cursor: &mut Cursor<'_>) -> bool {
        if cursor.node().is_empty() {
            return true;
        }
        let mut reduced = true;
        cursor.mark_start();
        cursor.start();
        loop {
            if cursor.current().is(NodeType::Exclamation) {
                let flag = cursor.current().clone();
                if !cursor.end_of_children() {
                    self.warning(
                        flag.position(),
                        format_args!(
                            "A special flag, !{} in this case, must only appear at the end of a declaration.",
                            flag.get_string()
                        ),
                    );
                }
                cursor.remove_current();
                cursor.node_mut().set_flag(flag.get_string(), true);
                cursor.mark_start();
            } else {
                let result = self.assignment(cursor);
                reduced &= result.is_some();
                cursor.collapse(result);
            }

            if cursor.end_of_children() {
                break;
            }
            cursor.advance();
            if cursor.current().is(NodeType::Whitespace) {
                if cursor.end_of_children() {
                    break;
                }
                cursor.mark_start();
                cursor.advance();
            }
        }
        cursor.trim_trailing_whitespace();
        reduced
    }

    /// Reduce the children of `container` as a nested expression list
    /// (`(...)` groups and `[...]` subscripts).
    fn nested_list(&mut self, mut container: Node) -> Option<Node> {
        let position = container.position().clone();
        self.nested(&position, |this| {
            let mut cursor = Cursor::new(&mut container, true);
            cursor.start();
            this.expression_list(&mut cursor, true)
        })
    }

    /// Run `evaluate` one nesting level deeper. Font metrics division only
    /// applies at the top level.
    fn nested<T>(
        &mut self,
        position: &Position,
        evaluate: impl FnOnce(&mut Self) -> Option<T>,
    ) -> Option<T> {
        if self.depth >= self.max_depth {
            self.error(position, "expression too deeply nested.");
            return None;
        }
        self.depth += 1;
        trace!("entering nesting level {} at {position}", self.depth);
        let divide_font_metrics = mem::replace(&mut self.divide_font_metrics, false);
        let result = evaluate(self);
        self.divide_font_metrics = divide_font_metrics;
        self.depth -= 1;
        result
    }

    fn error(&mut self, position: &Position, message: impl fmt::Display) {
        self.sink.emit(Severity::Error, position, &message.to_string());
    }

    fn warning(&mut self, position: &Position, message: impl fmt::Display) {
        self.sink.emit(Severity::Warning, position, &message.to_string());
    }

    /// Turn an operator failure into a diagnostic at `position`.
    fn apply<T>(&mut self, position: &Position, outcome: Result<T, OperatorError>) -> Option<T> {
        outcome.map_err(|error| self.error(position, error)).ok()
    }

    /// Truth value of a reduced operand.
    pub fn boolean(&mut self, value: &Node) -> Option<bool> {
        let truth = value.to_boolean();
        if truth.is_none() {
            self.error(value.position(), "a boolean expression was expected.");
        }
        truth
    }
}

/// Whether `node` is the identifier `word`, as used for `and`, `or`,
/// `not-equal`, `mul`, `div`, `mod` and `pow`.
fn is_word(node: &Node, word: &str) -> bool {
    node.is(NodeType::Identifier) && node.get_string() == word
}
