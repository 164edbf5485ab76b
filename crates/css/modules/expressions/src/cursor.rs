//! Traversal state over the children of one node.
//!
//! The cursor follows a lookahead-of-one model: [`Cursor::current`] is the
//! token loaded by the last [`Cursor::advance`], and `position` already
//! points past it. `current` borrows from the node; only
//! [`Cursor::consume`] hands out an owned copy. Reduced spans are spliced
//! back into the node with [`Cursor::collapse`], so the node's child count
//! only shrinks.

use core::mem;
use css_values_units::{Node, NodeType};
use log::trace;

pub struct Cursor<'tree> {
    node: &'tree mut Node,
    /// Index of the next unconsumed child.
    position: usize,
    /// Start of the span the next [`Cursor::collapse`] replaces.
    mark: Option<usize>,
    /// Child index of `current`, `None` once the end was reached.
    current_index: Option<usize>,
    /// Stands in for `current` past the last child.
    end: Node,
    skip_whitespace: bool,
}

impl<'tree> Cursor<'tree> {
    /// A cursor before the first child of `node`. Call [`Cursor::advance`]
    /// to load the first token.
    pub fn new(node: &'tree mut Node, skip_whitespace: bool) -> Self {
        let end = Node::new(NodeType::Eof, node.position().clone());
        Self {
            node,
            position: 0,
            mark: None,
            current_index: None,
            end,
            skip_whitespace,
        }
    }

    pub fn current(&self) -> &Node {
        self.current_index
            .and_then(|index| self.node.child(index))
            .unwrap_or(&self.end)
    }

    pub fn node(&self) -> &Node {
        self.node
    }

    pub fn node_mut(&mut self) -> &mut Node {
        self.node
    }

    /// Change whitespace skipping, returning the previous setting.
    ///
    /// Turning skipping on also steps over whitespace right after `current`.
    pub fn set_skip_whitespace(&mut self, skip: bool) -> bool {
        let previous = mem::replace(&mut self.skip_whitespace, skip);
        if skip {
            self.skip_pending_whitespace();
        }
        previous
    }

    fn skip_pending_whitespace(&mut self) {
        while self
            .node
            .child(self.position)
            .is_some_and(|next| next.is(NodeType::Whitespace))
        {
            self.position += 1;
        }
    }

    /// Whether every child was consumed.
    pub fn end_of_children(&self) -> bool {
        self.position >= self.node.child_count()
    }

    /// The next unconsumed child, without moving.
    pub fn look_ahead(&self) -> Option<&Node> {
        self.node.child(self.position)
    }

    /// The child `offset` places after the next unconsumed one.
    pub fn peek(&self, offset: usize) -> Option<&Node> {
        self.node.child(self.position + offset)
    }

    /// Move `current` to the next token.
    ///
    /// Past the end of the children `current` is an EOF token, so it is
    /// always safe to test.
    pub fn advance(&mut self) {
        if self.end_of_children() {
            self.current_index = None;
            return;
        }
        self.current_index = Some(self.position);
        self.position += 1;
        if self.skip_whitespace {
            self.skip_pending_whitespace();
        }
    }

    /// Load the first token, stepping over leading whitespace when
    /// skipping is on.
    pub fn start(&mut self) {
        if self.skip_whitespace {
            self.skip_pending_whitespace();
        }
        self.advance();
    }

    /// Copy out `current` and advance past it.
    pub fn consume(&mut self) -> Node {
        let taken = self.current().clone();
        self.advance();
        taken
    }

    /// Record the start of the next sub-expression.
    pub fn mark_start(&mut self) {
        self.mark = Some(self.position);
    }

    /// Replace the span from the mark up to `current` with `result`.
    ///
    /// A whitespace token right before `current` is kept so that
    /// space-separated values stay separated. Without a result nothing is
    /// replaced. After a splice `current` is the inserted value. The mark
    /// always moves to the new position.
    ///
    /// # Panics
    /// Panics when a result is given and [`Cursor::mark_start`] was never
    /// called; that is a bug in the evaluator, not in the input.
    #[allow(clippy::panic, reason = "collapsing without a mark is an evaluator bug")]
    pub fn collapse(&mut self, result: Option<Node>) -> Option<Node> {
        if let Some(value) = &result {
            let Some(start) = self.mark else {
                panic!("Cursor::collapse() called before Cursor::mark_start()");
            };
            let mut end = self
                .current_index
                .filter(|index| *index < self.node.child_count())
                .unwrap_or_else(|| self.node.child_count());
            if end > start
                && self
                    .node
                    .child(end - 1)
                    .is_some_and(|before| before.is(NodeType::Whitespace))
            {
                end -= 1;
            }
            let end = end.max(start);
            trace!(
                "collapsing children {start}..{end} of {} into {}",
                self.node.node_type(),
                value.node_type()
            );
            let children = self.node.children_mut();
            children.drain(start..end);
            children.insert(start, value.clone());
            self.position = start + 1;
            self.current_index = Some(start);
        }
        self.mark_start();
        result
    }

    /// Remove `current` from the children (used for `!flag` tokens).
    pub fn remove_current(&mut self) -> Option<Node> {
        let index = self.current_index.take()?;
        if index >= self.node.child_count() {
            return None;
        }
        let removed = self.node.children_mut().remove(index);
        if self.position > index {
            self.position -= 1;
        }
        Some(removed)
    }

    /// Drop whitespace tokens left at the end of the children.
    pub fn trim_trailing_whitespace(&mut self) {
        let children = self.node.children_mut();
        while children.last().is_some_and(|last| last.is(NodeType::Whitespace)) {
            children.pop();
        }
        self.position = self.position.min(children.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;
    use css_values_units::Position;

    fn sequence(types: &[NodeType]) -> Node {
        let position = Position::new("cursor", 1);
        let children = types
            .iter()
            .enumerate()
            .map(|(index, node_type)| match node_type {
                NodeType::Integer => Node::integer(position.clone(), index as i64),
                other => Node::new(*other, position.clone()),
            })
            .collect();
        Node::container(NodeType::List, position, children)
    }

    /// Whitespace is stepped over only when skipping is enabled.
    #[test]
    fn advance_skips_whitespace() {
        let mut node = sequence(&[NodeType::Integer, NodeType::Whitespace, NodeType::Integer]);
        let mut cursor = Cursor::new(&mut node, true);
        cursor.advance();
        assert_eq!(cursor.current().get_integer(), 0);
        cursor.advance();
        assert_eq!(cursor.current().get_integer(), 2);
        cursor.advance();
        assert!(cursor.current().is(NodeType::Eof));
        assert!(cursor.end_of_children());
    }

    /// A collapsed span keeps the whitespace that separated it from the rest.
    #[test]
    fn collapse_keeps_separator() {
        let mut node = sequence(&[
            NodeType::Integer,
            NodeType::Add,
            NodeType::Integer,
            NodeType::Whitespace,
            NodeType::Integer,
        ]);
        {
            let mut cursor = Cursor::new(&mut node, false);
            cursor.mark_start();
            cursor.advance();
            cursor.advance();
            cursor.advance();
            cursor.advance();
            // current is the whitespace after the sum
            let folded = Node::integer(Position::default(), 42);
            assert!(cursor.collapse(Some(folded)).is_some());
            assert_eq!(cursor.current().get_integer(), 42);
            cursor.advance();
            assert!(cursor.current().is(NodeType::Whitespace));
        }
        let types: Vec<NodeType> = node.children().iter().map(Node::node_type).collect();
        assert_eq!(types, [NodeType::Integer, NodeType::Whitespace, NodeType::Integer]);
        assert_eq!(node.child(0).map(Node::get_integer), Some(42));
    }

    /// `current` points into the node; only `consume` makes a copy.
    #[test]
    fn current_borrows_from_node() {
        let mut node = sequence(&[NodeType::Integer, NodeType::Integer]);
        let mut cursor = Cursor::new(&mut node, false);
        cursor.advance();
        assert!(
            cursor
                .node()
                .child(0)
                .is_some_and(|first| ptr::eq(first, cursor.current()))
        );
        let taken = cursor.consume();
        assert_eq!(taken.get_integer(), 0);
        assert_eq!(cursor.current().get_integer(), 1);
        assert_eq!(cursor.node().child_count(), 2);
        cursor.advance();
        assert!(cursor.current().is(NodeType::Eof));
        assert!(cursor.consume().is(NodeType::Eof));
    }

    /// Collapsing without a result leaves the children untouched.
    #[test]
    fn collapse_without_result_is_noop() {
        let mut node = sequence(&[NodeType::Integer, NodeType::Integer]);
        let mut cursor = Cursor::new(&mut node, false);
        cursor.advance();
        assert!(cursor.collapse(None).is_none());
        assert_eq!(cursor.node().child_count(), 2);
    }

    #[test]
    #[should_panic(expected = "mark_start")]
    fn collapse_requires_mark() {
        let mut node = sequence(&[NodeType::Integer]);
        let mut cursor = Cursor::new(&mut node, false);
        cursor.advance();
        cursor.collapse(Some(Node::null(Position::default())));
    }
}
