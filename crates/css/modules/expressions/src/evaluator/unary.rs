use super::Expression;
use crate::builtins;
use crate::cursor::Cursor;
use css_color::Color;
use css_values_units::{Node, NodeType, Position, Value};

/// Functions whose arguments are left for the consumer to evaluate.
const UNREDUCED_FUNCTIONS: [&str; 2] = ["calc", "expression"];

impl Expression<'_> {
    /// A unary expression followed by `[index]` subscripts or a `.field`.
    pub(super) fn postfix(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let mut result = self.unary(cursor)?;
        loop {
            match cursor.current().node_type() {
                NodeType::OpenSquareBracket => {
                    let bracket = cursor.consume();
                    let position = bracket.position().clone();
                    let index = self.nested_list(bracket)?;
                    result = self.subscript(&result, &index, &position)?;
                }
                NodeType::Period => {
                    let period = cursor.consume();
                    if !cursor.current().is(NodeType::Identifier) {
                        self.error(period.position(), "only an identifier is expected after a '.'.");
                        return None;
                    }
                    cursor.advance();
                    self.field(&result, period.position());
                    return None;
                }
                _ => break,
            }
        }
        Some(result)
    }

    /// `list[n]` with a 1-based `n`. For a map, `n` picks the n-th value.
    fn subscript(&mut self, container: &Node, index: &Node, position: &Position) -> Option<Node> {
        match index.node_type() {
            NodeType::Integer => {}
            NodeType::String | NodeType::Identifier => {
                self.field(container, position);
                return None;
            }
            other => {
                self.error(
                    position,
                    format_args!("unsupported type {other} for the 'list[<index>]' operation."),
                );
                return None;
            }
        }

        let number = index.get_integer();
        let (slot, count) = match container.node_type() {
            NodeType::Array | NodeType::List => (number.checked_sub(1), container.child_count()),
            NodeType::Map => (
                number
                    .checked_sub(1)
                    .and_then(|entry| entry.checked_mul(2))
                    .and_then(|key| key.checked_add(1)),
                container.child_count() / 2,
            ),
            other => {
                self.error(
                    position,
                    format_args!("unsupported type {other} for the 'list[<index>]' operation."),
                );
                return None;
            }
        };
        let item = slot
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|offset| container.child(offset));
        if item.is_none() {
            self.error(
                position,
                format_args!("index {number} is out of range. The allowed range is 1 to {count}."),
            );
        }
        item.cloned()
    }

    /// `map[name]` and `map.name`, which no receiver supports yet.
    fn field(&mut self, container: &Node, position: &Position) {
        if container.is(NodeType::List) {
            self.error(position, "'map[<string|identifier>]' not yet supported.");
        } else {
            self.error(
                position,
                format_args!(
                    "unsupported left handside type {} for the 'map[<string|identifier>]' operation.",
                    container.node_type()
                ),
            );
        }
    }

    /// Literals, groups, signs, function calls, `#hex` colors and
    /// identifiers.
    fn unary(&mut self, cursor: &mut Cursor<'_>) -> Option<Node> {
        match cursor.current().node_type() {
            NodeType::Array
            | NodeType::Boolean
            | NodeType::Color
            | NodeType::DecimalNumber
            | NodeType::Exclamation
            | NodeType::FontMetrics
            | NodeType::Integer
            | NodeType::Map
            | NodeType::Null
            | NodeType::Percent
            | NodeType::String
            | NodeType::UnicodeRange
            | NodeType::Url => Some(cursor.consume()),
            NodeType::Function => {
                let function = cursor.consume();
                self.call(function)
            }
            NodeType::OpenParenthesis => {
                let group = cursor.consume();
                self.nested_list(group)
            }
            NodeType::Add => {
                let sign = cursor.consume();
                self.nested(sign.position(), |this| this.power(cursor))
            }
            NodeType::Subtract => {
                let sign = cursor.consume();
                let operand = self.nested(sign.position(), |this| this.power(cursor))?;
                self.negate(operand, sign.position())
            }
            NodeType::Hash => {
                let hash = cursor.consume();
                let color = Color::from_hex(hash.get_string());
                if color.is_none() {
                    self.error(
                        hash.position(),
                        format_args!("the color in #{} is not valid.", hash.get_string()),
                    );
                }
                color.map(|parsed| Node::color(hash.position().clone(), parsed))
            }
            NodeType::Identifier => {
                let identifier = cursor.consume();
                Some(self.identifier(identifier))
            }
            other => {
                let position = cursor.current().position().clone();
                self.error(
                    &position,
                    format_args!("unsupported type {other} as a unary expression token."),
                );
                None
            }
        }
    }

    fn negate(&mut self, mut operand: Node, position: &Position) -> Option<Node> {
        match operand.node_type() {
            NodeType::Integer => {
                let negated = operand.get_integer().wrapping_neg();
                operand.set_value(Value::Integer(negated));
            }
            NodeType::DecimalNumber | NodeType::Percent => {
                let negated = -operand.get_decimal();
                operand.set_value(Value::Decimal(negated));
            }
            other => {
                self.error(position, format_args!("unsupported type {other} for operator '-'."));
                return None;
            }
        }
        Some(operand)
    }

    /// Keywords, locals and color names; anything else stays an identifier.
    fn identifier(&self, identifier: Node) -> Node {
        let position = identifier.position().clone();
        match identifier.get_string() {
            "null" => Node::null(position),
            "true" => Node::boolean(position, true),
            "false" => Node::boolean(position, false),
            name => {
                if let Some(local) = self.locals.get(name) {
                    return local.clone();
                }
                Color::from_name(name).map_or(identifier, |color| Node::color(position, color))
            }
        }
    }

    /// Reduce the arguments of `function`, then run it if it is a builtin.
    /// Other functions are returned with their arguments reduced.
    fn call(&mut self, mut function: Node) -> Option<Node> {
        let name = function.get_string().to_ascii_lowercase();
        if !UNREDUCED_FUNCTIONS.contains(&name.as_str()) {
            let position = function.position().clone();
            self.nested(&position, |this| this.reduce_arguments(&mut function).then_some(()))?;
        }
        builtins::call(self, function)
    }

    /// Every argument is reduced even after one fails, so all errors are
    /// reported.
    fn reduce_arguments(&mut self, function: &mut Node) -> bool {
        let count = function.child_count();
        let skip_block = function
            .children()
            .last()
            .is_some_and(|last| last.is(NodeType::OpenCurlyBracket));
        let mut reduced = true;
        for (index, argument) in function.children_mut().iter_mut().enumerate() {
            if skip_block && index + 1 == count {
                continue;
            }
            let mut cursor = Cursor::new(argument, true);
            reduced &= self.compile_list(&mut cursor);
        }
        reduced
    }
}
