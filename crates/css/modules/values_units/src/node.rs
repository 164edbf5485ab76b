//! The value node flowing through tokenization and expression reduction.

use crate::unicode_range::UnicodeRange;
use core::fmt;
use core::mem;
use css_color::Color;
use std::collections::BTreeSet;

/// Source location carried for diagnostics only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// File name (or a logical source name).
    pub file: String,
    /// One-based line number.
    pub line: u32,
}

impl Position {
    /// Create a position at `line` of `file`.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}({})", self.file, self.line)
    }
}

/// Type tag of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Add,
    And,
    Arg,
    Array,
    Assignment,
    Boolean,
    Colon,
    Color,
    Column,
    Comma,
    Conditional,
    DashMatch,
    DecimalNumber,
    Divide,
    Eof,
    Equal,
    Exclamation,
    FontMetrics,
    Function,
    GreaterEqual,
    GreaterThan,
    Hash,
    Identifier,
    IncludeMatch,
    Integer,
    LessEqual,
    LessThan,
    List,
    Map,
    Modulo,
    Multiply,
    NotEqual,
    Null,
    OpenCurlyBracket,
    OpenParenthesis,
    OpenSquareBracket,
    Percent,
    Period,
    Power,
    PrefixMatch,
    String,
    SubstringMatch,
    Subtract,
    SuffixMatch,
    UnicodeRange,
    Unknown,
    Url,
    Variable,
    VariableFunction,
    Whitespace,
}

impl NodeType {
    /// Upper-case name used in diagnostics, e.g. `DECIMAL_NUMBER`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::And => "AND",
            Self::Arg => "ARG",
            Self::Array => "ARRAY",
            Self::Assignment => "ASSIGNMENT",
            Self::Boolean => "BOOLEAN",
            Self::Colon => "COLON",
            Self::Color => "COLOR",
            Self::Column => "COLUMN",
            Self::Comma => "COMMA",
            Self::Conditional => "CONDITIONAL",
            Self::DashMatch => "DASH_MATCH",
            Self::DecimalNumber => "DECIMAL_NUMBER",
            Self::Divide => "DIVIDE",
            Self::Eof => "EOF_TOKEN",
            Self::Equal => "EQUAL",
            Self::Exclamation => "EXCLAMATION",
            Self::FontMetrics => "FONT_METRICS",
            Self::Function => "FUNCTION",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::Hash => "HASH",
            Self::Identifier => "IDENTIFIER",
            Self::IncludeMatch => "INCLUDE_MATCH",
            Self::Integer => "INTEGER",
            Self::LessEqual => "LESS_EQUAL",
            Self::LessThan => "LESS_THAN",
            Self::List => "LIST",
            Self::Map => "MAP",
            Self::Modulo => "MODULO",
            Self::Multiply => "MULTIPLY",
            Self::NotEqual => "NOT_EQUAL",
            Self::Null => "NULL_TOKEN",
            Self::OpenCurlyBracket => "OPEN_CURLYBRACKET",
            Self::OpenParenthesis => "OPEN_PARENTHESIS",
            Self::OpenSquareBracket => "OPEN_SQUAREBRACKET",
            Self::Percent => "PERCENT",
            Self::Period => "PERIOD",
            Self::Power => "POWER",
            Self::PrefixMatch => "PREFIX_MATCH",
            Self::String => "STRING",
            Self::SubstringMatch => "SUBSTRING_MATCH",
            Self::Subtract => "SUBTRACT",
            Self::SuffixMatch => "SUFFIX_MATCH",
            Self::UnicodeRange => "UNICODE_RANGE",
            Self::Unknown => "UNKNOWN",
            Self::Url => "URL",
            Self::Variable => "VARIABLE",
            Self::VariableFunction => "VARIABLE_FUNCTION",
            Self::Whitespace => "WHITESPACE",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Scalar payload of a [`Node`]. Containers keep their elements in `children`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    None,
    Boolean(bool),
    Integer(i64),
    /// Decimal numbers, and percents stored as a fraction (`50%` is `0.5`).
    Decimal(f64),
    /// Strings, identifiers, function names, hashes, urls, variable names.
    Text(String),
    Color(Color),
    Range(UnicodeRange),
}

/// A token or value in an expression tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    node_type: NodeType,
    position: Position,
    value: Value,
    dimension: String,
    children: Vec<Node>,
    flags: BTreeSet<String>,
}

impl Node {
    /// Create an empty node of `node_type`.
    pub fn new(node_type: NodeType, position: Position) -> Self {
        Self {
            node_type,
            position,
            value: Value::None,
            dimension: String::new(),
            children: Vec::new(),
            flags: BTreeSet::new(),
        }
    }

    /// Create a node carrying `value`.
    pub fn with_value(node_type: NodeType, position: Position, value: Value) -> Self {
        let mut node = Self::new(node_type, position);
        node.value = value;
        node
    }

    pub fn boolean(position: Position, flag: bool) -> Self {
        Self::with_value(NodeType::Boolean, position, Value::Boolean(flag))
    }

    pub fn integer(position: Position, number: i64) -> Self {
        Self::with_value(NodeType::Integer, position, Value::Integer(number))
    }

    pub fn decimal(position: Position, number: f64) -> Self {
        Self::with_value(NodeType::DecimalNumber, position, Value::Decimal(number))
    }

    /// A percent node; `fraction` is `0.5` for `50%`.
    pub fn percent(position: Position, fraction: f64) -> Self {
        Self::with_value(NodeType::Percent, position, Value::Decimal(fraction))
    }

    /// A node whose payload is text (STRING, IDENTIFIER, FUNCTION, HASH, ...).
    pub fn text(node_type: NodeType, position: Position, text: impl Into<String>) -> Self {
        Self::with_value(node_type, position, Value::Text(text.into()))
    }

    pub fn color(position: Position, color: Color) -> Self {
        Self::with_value(NodeType::Color, position, Value::Color(color))
    }

    pub fn unicode_range(position: Position, range: UnicodeRange) -> Self {
        Self::with_value(NodeType::UnicodeRange, position, Value::Range(range))
    }

    pub fn null(position: Position) -> Self {
        Self::new(NodeType::Null, position)
    }

    /// A container node holding `children`.
    pub fn container(node_type: NodeType, position: Position, children: Vec<Self>) -> Self {
        let mut node = Self::new(node_type, position);
        node.children = children;
        node
    }

    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Whether this node carries the `node_type` tag.
    pub fn is(&self, node_type: NodeType) -> bool {
        self.node_type == node_type
    }

    pub const fn position(&self) -> &Position {
        &self.position
    }

    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Boolean payload; `false` for other payloads.
    pub const fn get_boolean(&self) -> bool {
        matches!(self.value, Value::Boolean(true))
    }

    /// Integer payload; zero for other payloads.
    pub const fn get_integer(&self) -> i64 {
        match self.value {
            Value::Integer(number) => number,
            _ => 0,
        }
    }

    /// Decimal (or percent fraction) payload; zero for other payloads.
    pub const fn get_decimal(&self) -> f64 {
        match self.value {
            Value::Decimal(number) => number,
            _ => 0.0,
        }
    }

    /// Text payload; empty for other payloads.
    pub fn get_string(&self) -> &str {
        match &self.value {
            Value::Text(text) => text,
            _ => "",
        }
    }

    pub const fn get_color(&self) -> Option<Color> {
        match self.value {
            Value::Color(color) => Some(color),
            _ => None,
        }
    }

    pub const fn get_unicode_range(&self) -> Option<UnicodeRange> {
        match self.value {
            Value::Range(range) => Some(range),
            _ => None,
        }
    }

    /// Numeric value of an INTEGER, DECIMAL_NUMBER or PERCENT node.
    pub fn get_number(&self) -> Option<f64> {
        match (self.node_type, &self.value) {
            (NodeType::Integer, Value::Integer(number)) => Some(*number as f64),
            (NodeType::DecimalNumber | NodeType::Percent, Value::Decimal(number)) => Some(*number),
            _ => None,
        }
    }

    /// Replace the payload of this node.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Unit string attached to a number, e.g. `px` or `px * em / s`.
    pub fn get_dimension(&self) -> &str {
        &self.dimension
    }

    pub fn set_dimension(&mut self, dimension: impl Into<String>) {
        self.dimension = dimension.into();
    }

    /// Builder form of [`Node::set_dimension`].
    #[must_use]
    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = dimension.into();
        self
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    pub const fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Take the children out of this node, leaving it empty.
    pub fn take_children(&mut self) -> Vec<Self> {
        mem::take(&mut self.children)
    }

    /// Set or clear the named side-channel flag.
    pub fn set_flag(&mut self, name: &str, set: bool) {
        if set {
            self.flags.insert(name.to_owned());
        } else {
            self.flags.remove(name);
        }
    }

    pub fn get_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Boolean interpretation of this node; `None` marks an invalid boolean.
    ///
    /// Numbers are true when non-zero, strings and containers when non-empty,
    /// colors when any channel is set. `null` is false.
    pub fn to_boolean(&self) -> Option<bool> {
        match self.node_type {
            NodeType::Boolean => Some(self.get_boolean()),
            NodeType::Integer => Some(self.get_integer() != 0),
            NodeType::DecimalNumber | NodeType::Percent => Some(self.get_decimal() != 0.0),
            NodeType::String => Some(!self.get_string().is_empty()),
            NodeType::Null => Some(false),
            NodeType::Array | NodeType::List | NodeType::Map => Some(!self.children.is_empty()),
            NodeType::Color => self.get_color().map(|color| color.is_non_zero()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Boolean coercion follows the payload, and unsupported types are invalid.
    #[test]
    fn boolean_coercion() {
        let pos = Position::new("test.css", 1);
        assert_eq!(Node::integer(pos.clone(), 3).to_boolean(), Some(true));
        assert_eq!(Node::decimal(pos.clone(), 0.0).to_boolean(), Some(false));
        assert_eq!(Node::text(NodeType::String, pos.clone(), "").to_boolean(), Some(false));
        assert_eq!(Node::null(pos.clone()).to_boolean(), Some(false));
        assert_eq!(Node::container(NodeType::Array, pos.clone(), Vec::new()).to_boolean(), Some(false));
        assert_eq!(Node::text(NodeType::Identifier, pos, "auto").to_boolean(), None);
    }

    /// Flags can be toggled by name.
    #[test]
    fn flags_toggle() {
        let mut node = Node::null(Position::default());
        node.set_flag("important", true);
        assert!(node.get_flag("important"));
        node.set_flag("important", false);
        assert!(!node.get_flag("important"));
    }
}
