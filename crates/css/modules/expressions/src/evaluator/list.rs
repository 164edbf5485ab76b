use super::Expression;
use crate::cursor::Cursor;
use css_values_units::{Node, NodeType};
use log::debug;

/// `IDENTIFIER ':'`, with optional whitespace before the colon.
fn is_label(cursor: &Cursor<'_>) -> bool {
    if !cursor.current().is(NodeType::Identifier) {
        return false;
    }
    match cursor.look_ahead() {
        Some(next) if next.is(NodeType::Whitespace) => {
            cursor.peek(1).is_some_and(|after| after.is(NodeType::Colon))
        }
        Some(next) => next.is(NodeType::Colon),
        None => false,
    }
}

impl Expression<'_> {
    /// `a, b, c` as an ARRAY, `key: value, ...` as a MAP, or a single
    /// value. Labels are only recognized where `allow_map` is set.
    pub(super) fn expression_list(&mut self, cursor: &mut Cursor<'_>, allow_map: bool) -> Option<Node> {
        let skip_whitespace = cursor.set_skip_whitespace(true);
        let result = if allow_map && is_label(cursor) {
            self.map(cursor)
        } else {
            self.array(cursor)
        };
        cursor.set_skip_whitespace(skip_whitespace);
        result
    }

    /// Children alternate key and value. A missing value is `null`.
    fn map(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut map = Node::new(NodeType::Map, cursor.current().position().clone());
        while is_label(cursor) {
            let key = cursor.consume();
            // the colon
            cursor.advance();
            let value = if cursor.current().is(NodeType::Comma) || cursor.current().is(NodeType::Eof) {
                Node::null(cursor.current().position().clone())
            } else {
                self.assignment(cursor)?
            };
            map.add_child(key);
            map.add_child(value);
            if !cursor.current().is(NodeType::Comma) {
                break;
            }
            cursor.advance();
        }
        debug!("built map of {} entries", map.child_count() / 2);
        Some(map)
    }

    fn array(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let first = self.assignment(cursor)?;
        if !cursor.current().is(NodeType::Comma) {
            return Some(first);
        }
        let mut array = Node::container(NodeType::Array, first.position().clone(), vec![first]);
        while cursor.current().is(NodeType::Comma) {
            cursor.advance();
            array.add_child(self.assignment(cursor)?);
        }
        Some(array)
    }

    /// `name := value` binds a local and yields the value.
    pub(super) fn assignment(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let binds = cursor.current().is(NodeType::Identifier)
            && cursor.look_ahead().is_some_and(|next| next.is(NodeType::Assignment));
        if !binds {
            return self.conditional(cursor);
        }
        let name = cursor.consume();
        // the `:=`
        cursor.advance();
        let value = self.conditional(cursor)?;
        debug!("{}: local {} := {}", name.position(), name.get_string(), value.node_type());
        self.locals.insert(name.get_string().to_owned(), value.clone());
        Some(value)
    }
}
