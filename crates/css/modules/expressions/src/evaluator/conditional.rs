use super::{Expression, is_word};
use crate::cursor::Cursor;
use css_values_units::{Node, NodeType};

impl Expression<'_> {
    /// `condition ? when_true : when_false`.
    ///
    /// Both branches are reduced before the condition picks one, so a
    /// failure in the branch not taken is still reported.
    pub(super) fn conditional(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut result = self.logical_or(cursor)?;
        while cursor.current().is(NodeType::Conditional) {
            cursor.advance();
            let when_true = self.expression_list(cursor, false);
            if !cursor.current().is(NodeType::Colon) {
                let position = cursor.current().position().clone();
                self.error(&position, "a mandatory ':' was expected after a '?' first expression.");
                return None;
            }
            cursor.advance();
            let when_false = self.logical_or(cursor);
            result = if self.boolean(&result)? { when_true? } else { when_false? };
        }
        Some(result)
    }

    /// `||` or `or`.
    fn logical_or(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut result = self.logical_and(cursor)?;
        while cursor.current().is(NodeType::Column) || is_word(cursor.current(), "or") {
            let operator = cursor.consume();
            let rhs = self.logical_and(cursor)?;
            let (Some(left), Some(right)) = (self.boolean(&result), self.boolean(&rhs)) else {
                return None;
            };
            result = Node::boolean(operator.position().clone(), left || right);
        }
        Some(result)
    }

    /// `&&` or `and`.
    fn logical_and(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut result = self.equality(cursor)?;
        while cursor.current().is(NodeType::And) || is_word(cursor.current(), "and") {
            let operator = cursor.consume();
            let rhs = self.equality(cursor)?;
            let (Some(left), Some(right)) = (self.boolean(&result), self.boolean(&rhs)) else {
                return None;
            };
            result = Node::boolean(operator.position().clone(), left && right);
        }
        Some(result)
    }
}
