use super::{Expression, is_word};
use crate::cursor::Cursor;
use crate::operators::{MatchOperator, is_equal, is_less_than, matches};
use css_values_units::{Node, NodeType};

#[derive(Clone, Copy)]
enum Equality {
    Equal,
    NotEqual,
    Match(MatchOperator),
}

fn equality_operator(node: &Node) -> Option<Equality> {
    match node.node_type() {
        NodeType::Equal => Some(Equality::Equal),
        NodeType::NotEqual => Some(Equality::NotEqual),
        _ if is_word(node, "not-equal") => Some(Equality::NotEqual),
        other => MatchOperator::from_node_type(other).map(Equality::Match),
    }
}

#[derive(Clone, Copy)]
enum Relation {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

const fn relation_operator(node_type: NodeType) -> Option<Relation> {
    match node_type {
        NodeType::LessThan => Some(Relation::Less),
        NodeType::LessEqual => Some(Relation::LessEqual),
        NodeType::GreaterThan => Some(Relation::Greater),
        NodeType::GreaterEqual => Some(Relation::GreaterEqual),
        _ => None,
    }
}

impl Expression<'_> {
    /// `=`, `!=` (or `not-equal`) and the string match operators.
    pub(super) fn equality(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut result = self.relational(cursor)?;
        while let Some(operator) = equality_operator(cursor.current()) {
            let token = cursor.consume();
            if token.get_string() == "==" {
                self.warning(
                    token.position(),
                    "we accepted '==' instead of '=' in an expression, you probably want to change the operator to just '='.",
                );
            }
            let rhs = self.relational(cursor)?;
            let outcome = match operator {
                Equality::Equal => is_equal(&result, &rhs),
                Equality::NotEqual => is_equal(&result, &rhs).map(|equal| !equal),
                Equality::Match(kind) => matches(kind, &result, &rhs),
            };
            let truth = self.apply(result.position(), outcome)?;
            result = Node::boolean(token.position().clone(), truth);
        }
        Some(result)
    }

    /// `<`, `<=`, `>` and `>=`.
    ///
    /// `<=` requires both `<` and `=` to hold, so it is never true, and `>`
    /// requires neither.
    fn relational(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut result = self.additive(cursor)?;
        while let Some(operator) = relation_operator(cursor.current().node_type()) {
            let token = cursor.consume();
            let rhs = self.additive(cursor)?;
            let less = is_less_than(&result, &rhs);
            let outcome = match operator {
                Relation::Less => less,
                Relation::LessEqual => less.and_then(|smaller| is_equal(&result, &rhs).map(|equal| smaller && equal)),
                Relation::Greater => less.and_then(|smaller| is_equal(&result, &rhs).map(|equal| !smaller && !equal)),
                Relation::GreaterEqual => less.map(|smaller| !smaller),
            };
            let truth = self.apply(result.position(), outcome)?;
            result = Node::boolean(token.position().clone(), truth);
        }
        Some(result)
    }
}
