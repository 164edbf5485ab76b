//! Preprocessor variables: scoped `$name` definitions and their substitution.
//! Spec: <https://www.w3.org/TR/css-variables-1/> (analogue for `$` variables)
//!
//! The expression evaluator only needs the read side, expressed by
//! [`VariableLookup`]. [`VariableTable`] is the scoped store a host
//! fills while walking its rules; it also replaces `$name` tokens in a
//! token tree before evaluation.

#![forbid(unsafe_code)]

mod substitute;

use css_values_units::{Node, NodeType};
use log::debug;
use std::collections::HashMap;

/// Read access to variable definitions.
///
/// Definitions are returned as stored: a VARIABLE node whose single child is
/// the value, or a VARIABLE_FUNCTION node for a function-like definition.
pub trait VariableLookup {
    /// Find `name`, searching only the outermost scope when `global_only` is set.
    fn get_variable(&self, name: &str, global_only: bool) -> Option<Node>;
}

/// One level of definitions, keyed by name without the `$`.
type Scope = HashMap<String, Node>;

/// Stack of variable scopes; index zero is the global scope.
#[derive(Clone, Debug)]
pub struct VariableTable {
    scopes: Vec<Scope>,
    empty_on_undefined: bool,
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableTable {
    /// A table holding only an empty global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
            empty_on_undefined: false,
        }
    }

    /// When set, [`VariableTable::substitute`] drops undefined variables
    /// instead of failing.
    pub fn set_empty_on_undefined(&mut self, empty: bool) {
        self.empty_on_undefined = empty;
    }

    pub const fn empty_on_undefined(&self) -> bool {
        self.empty_on_undefined
    }

    /// Open a nested scope (entering a block).
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Close the innermost scope. The global scope is never removed.
    pub fn pop_scope(&mut self) -> bool {
        if self.scopes.len() <= 1 {
            return false;
        }
        self.scopes.pop().is_some()
    }

    fn wrap(name: &str, value: Node) -> Node {
        let mut definition = Node::text(NodeType::Variable, value.position().clone(), name);
        definition.add_child(value);
        definition
    }

    fn insert(&mut self, global: bool, name: &str, definition: Node) {
        debug!("defining ${name} ({})", if global { "global" } else { "local" });
        let scope = if global {
            self.scopes.first_mut()
        } else {
            self.scopes.last_mut()
        };
        if let Some(scope) = scope {
            scope.insert(name.to_owned(), definition);
        }
    }

    /// Define `name` in the innermost scope.
    pub fn set_variable(&mut self, name: &str, value: Node) {
        self.insert(false, name, Self::wrap(name, value));
    }

    /// Define `name` in the global scope.
    pub fn set_global_variable(&mut self, name: &str, value: Node) {
        self.insert(true, name, Self::wrap(name, value));
    }

    /// Define a function-like variable (`$name(params) { body }`) in the innermost scope.
    ///
    /// `parts` are kept as the children of the VARIABLE_FUNCTION definition.
    pub fn set_function(&mut self, name: &str, parts: Vec<Node>) {
        let position = parts.first().map(|part| part.position().clone()).unwrap_or_default();
        let mut definition = Node::text(NodeType::VariableFunction, position, name);
        for part in parts {
            definition.add_child(part);
        }
        self.insert(false, name, definition);
    }

    /// The value of a plain variable, without its VARIABLE wrapper.
    pub fn get_value(&self, name: &str) -> Option<Node> {
        self.get_variable(name, false)
            .filter(|definition| definition.is(NodeType::Variable))
            .and_then(|definition| definition.child(0).cloned())
    }
}

impl VariableLookup for VariableTable {
    fn get_variable(&self, name: &str, global_only: bool) -> Option<Node> {
        if global_only {
            return self.scopes.first()?.get(name).cloned();
        }
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::Position;

    /// Inner scopes shadow the global one until they are popped.
    #[test]
    fn scoped_lookup() {
        let mut table = VariableTable::new();
        table.set_variable("width", Node::integer(Position::default(), 1));
        table.push_scope();
        table.set_variable("width", Node::integer(Position::default(), 2));
        assert_eq!(table.get_value("width").map(|value| value.get_integer()), Some(2));
        let global = table.get_variable("width", true);
        assert_eq!(global.and_then(|node| node.child(0).map(Node::get_integer)), Some(1));
        assert!(table.pop_scope());
        assert!(!table.pop_scope());
        assert_eq!(table.get_value("width").map(|value| value.get_integer()), Some(1));
    }

    /// Function definitions are tagged so callers can tell them apart.
    #[test]
    fn function_definitions() {
        let mut table = VariableTable::new();
        table.push_scope();
        table.set_function("double", vec![Node::null(Position::default())]);
        let found = table.get_variable("double", false);
        assert!(found.is_some_and(|node| node.is(NodeType::VariableFunction)));
        assert!(table.get_variable("double", true).is_none());
        assert!(table.get_value("double").is_none());
    }
}
