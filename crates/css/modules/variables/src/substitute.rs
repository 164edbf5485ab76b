//! Replacement of `$name` tokens with variable values.

use crate::{VariableLookup, VariableTable};
use anyhow::{Result, bail};
use css_values_units::{Node, NodeType};

/// Node types whose children may hold variable references.
fn holds_tokens(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Arg
            | NodeType::Function
            | NodeType::List
            | NodeType::OpenCurlyBracket
            | NodeType::OpenParenthesis
            | NodeType::OpenSquareBracket
    )
}

impl VariableTable {
    /// Replace every `$name` in `node` with the variable's value.
    ///
    /// LIST values are spliced into the surrounding tokens; other values
    /// (including parenthesized groups) replace the reference as one node.
    /// Variables referenced by a value are substituted too.
    ///
    /// # Errors
    /// Fails when a variable is undefined (unless
    /// [`VariableTable::set_empty_on_undefined`] is on), names a function, or
    /// refers to itself through its own value.
    pub fn substitute(&self, node: &mut Node) -> Result<()> {
        self.substitute_within(node, &mut Vec::new())
    }

    fn substitute_within(&self, node: &mut Node, stack: &mut Vec<String>) -> Result<()> {
        let children = node.children_mut();
        let mut index = 0;
        while index < children.len() {
            let Some(child) = children.get_mut(index) else {
                break;
            };
            if !child.is(NodeType::Variable) {
                if holds_tokens(child.node_type()) {
                    self.substitute_within(child, stack)?;
                }
                index += 1;
                continue;
            }
            let name = child.get_string().to_owned();
            let replacement = self.resolve(&name, stack)?;
            children.remove(index);
            let inserted = replacement.len();
            for (offset, value) in replacement.into_iter().enumerate() {
                children.insert(index + offset, value);
            }
            index += inserted;
        }
        Ok(())
    }

    /// Nodes that replace `$name`, already substituted themselves.
    fn resolve(&self, name: &str, stack: &mut Vec<String>) -> Result<Vec<Node>> {
        if stack.iter().any(|pending| pending == name) {
            bail!("variable named \"{name}\" refers to itself.");
        }
        let Some(definition) = self.get_variable(name, false) else {
            if self.empty_on_undefined {
                return Ok(Vec::new());
            }
            bail!("variable named \"{name}\" is not set.");
        };
        if definition.is(NodeType::VariableFunction) {
            bail!("variable named \"{name}\" is a function and cannot be used as a value.");
        }
        let Some(mut value) = definition.child(0).cloned() else {
            return Ok(Vec::new());
        };
        stack.push(name.to_owned());
        let substituted = if holds_tokens(value.node_type()) {
            self.substitute_within(&mut value, stack)
        } else if value.is(NodeType::Variable) {
            self.resolve(value.get_string(), stack).map(|nodes| {
                value = Node::container(NodeType::List, value.position().clone(), nodes);
            })
        } else {
            Ok(())
        };
        stack.pop();
        substituted?;
        Ok(match value.node_type() {
            NodeType::List => value.take_children(),
            NodeType::Whitespace => Vec::new(),
            _ => vec![value],
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test fixtures")]
mod tests {
    use super::*;
    use css_values_units::Position;

    fn pos() -> Position {
        Position::new("vars.css", 3)
    }

    fn list(children: Vec<Node>) -> Node {
        Node::container(NodeType::List, pos(), children)
    }

    /// LIST values are spliced in place of the reference.
    #[test]
    fn splices_list_values() {
        let mut table = VariableTable::new();
        table.set_variable(
            "pair",
            list(vec![Node::integer(pos(), 1), Node::new(NodeType::Add, pos()), Node::integer(pos(), 2)]),
        );
        let mut expression = list(vec![
            Node::text(NodeType::Variable, pos(), "pair"),
            Node::new(NodeType::Multiply, pos()),
            Node::integer(pos(), 3),
        ]);
        table.substitute(&mut expression).unwrap();
        assert_eq!(expression.child_count(), 5);
        assert_eq!(expression.child(3).unwrap().node_type(), NodeType::Multiply);
    }

    /// References nested in function arguments and inside values are resolved.
    #[test]
    fn resolves_nested_references() {
        let mut table = VariableTable::new();
        table.set_variable("base", list(vec![Node::integer(pos(), 4).with_dimension("px")]));
        table.set_variable("gap", list(vec![Node::text(NodeType::Variable, pos(), "base")]));
        let mut argument = Node::new(NodeType::Arg, pos());
        argument.add_child(Node::text(NodeType::Variable, pos(), "gap"));
        let mut function = Node::text(NodeType::Function, pos(), "abs");
        function.add_child(argument);
        let mut expression = list(vec![function]);
        table.substitute(&mut expression).unwrap();
        let value = expression.child(0).unwrap().child(0).unwrap().child(0).unwrap();
        assert_eq!(value.get_integer(), 4);
        assert_eq!(value.get_dimension(), "px");
    }

    /// Undefined and self-referencing variables fail unless emptied.
    #[test]
    fn undefined_and_cyclic() {
        let mut table = VariableTable::new();
        let mut expression = list(vec![Node::text(NodeType::Variable, pos(), "missing")]);
        let error = table.substitute(&mut expression).unwrap_err();
        assert_eq!(error.to_string(), "variable named \"missing\" is not set.");

        table.set_variable("loop", list(vec![Node::text(NodeType::Variable, pos(), "loop")]));
        let mut cyclic = list(vec![Node::text(NodeType::Variable, pos(), "loop")]);
        assert!(table.substitute(&mut cyclic).is_err());

        table.set_empty_on_undefined(true);
        table.substitute(&mut expression).unwrap();
        assert!(expression.is_empty());
    }
}
