use super::{Expression, is_word};
use crate::cursor::Cursor;
use crate::operators::{MultiplicativeOperator, add, font_metrics, multiply, power};
use css_values_units::{Node, NodeType};

impl Expression<'_> {
    /// `+` and `-`.
    pub(super) fn additive(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut result = self.multiplicative(cursor)?;
        loop {
            let subtract = match cursor.current().node_type() {
                NodeType::Add => false,
                NodeType::Subtract => true,
                _ => break,
            };
            cursor.advance();
            let rhs = self.multiplicative(cursor)?;
            let outcome = add(&result, &rhs, subtract);
            result = self.apply(result.position(), outcome)?;
        }
        Some(result)
    }

    /// `*`, `/` and `%`, or `mul`, `div` and `mod`.
    fn multiplicative(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut result = self.power(cursor)?;
        while let Some(operator) = MultiplicativeOperator::from_node(cursor.current()) {
            cursor.advance();
            let rhs = self.power(cursor)?;
            let outcome = if operator == MultiplicativeOperator::Divide && self.divide_font_metrics {
                font_metrics(&result, &rhs)
            } else {
                multiply(operator, &result, &rhs)
            };
            result = self.apply(result.position(), outcome)?;
        }
        Some(result)
    }

    /// `**` or `pow`. The operator does not chain.
    pub(super) fn power(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let result = self.postfix(cursor)?;
        if cursor.current().is(NodeType::Power) || is_word(cursor.current(), "pow") {
            cursor.advance();
            let rhs = self.postfix(cursor)?;
            let outcome = power(&result, &rhs);
            return self.apply(result.position(), outcome);
        }
        Some(result)
    }
}
