//! Text form of reduced values, as produced by `string()` and `inspect()`.
//! Spec: <https://www.w3.org/TR/cssom-1/#serializing-css-values>

use crate::chapter_4_numbers::format_decimal;
use crate::chapter_5_percentages::format_percent;
use crate::node::{Node, NodeType};

/// Quote `text` as a CSS string, preferring double quotes.
fn quote(text: &str) -> String {
    if text.contains('"') && !text.contains('\'') {
        return format!("'{text}'");
    }
    format!("\"{}\"", text.replace('"', "\\\""))
}

impl Node {
    /// Serialize this node as CSS text.
    ///
    /// Strings are quoted only when `show_quotes` is set. Containers join
    /// their children with spaces (LIST) or commas (ARRAY, MAP).
    pub fn to_css_string(&self, show_quotes: bool) -> String {
        match self.node_type() {
            NodeType::Boolean => self.get_boolean().to_string(),
            NodeType::Integer => format!("{}{}", self.get_integer(), self.get_dimension()),
            NodeType::DecimalNumber => {
                format!("{}{}", format_decimal(self.get_decimal()), self.get_dimension())
            }
            NodeType::Percent => format_percent(self.get_decimal()),
            NodeType::String if show_quotes => quote(self.get_string()),
            NodeType::String | NodeType::Identifier => self.get_string().to_owned(),
            NodeType::Hash => format!("#{}", self.get_string()),
            NodeType::Url => format!("url({})", self.get_string()),
            NodeType::Variable => format!("${}", self.get_string()),
            NodeType::Exclamation => format!("!{}", self.get_string()),
            NodeType::Color => self
                .get_color()
                .map(|color| color.to_css_string())
                .unwrap_or_default(),
            NodeType::UnicodeRange => self
                .get_unicode_range()
                .map(|range| range.to_string())
                .unwrap_or_default(),
            NodeType::Null => String::new(),
            NodeType::Function => format!(
                "{}({})",
                self.get_string(),
                self.join_children(",", show_quotes)
            ),
            NodeType::FontMetrics => self.join_children("/", show_quotes),
            NodeType::OpenParenthesis => format!("({})", self.join_children("", show_quotes)),
            NodeType::OpenSquareBracket => format!("[{}]", self.join_children("", show_quotes)),
            NodeType::OpenCurlyBracket => format!("{{{}}}", self.join_children("", show_quotes)),
            NodeType::List => self.join_children(" ", show_quotes),
            NodeType::Array | NodeType::Map => self.join_children(", ", show_quotes),
            NodeType::Arg | NodeType::VariableFunction => self.join_children("", show_quotes),
            NodeType::Whitespace => " ".to_owned(),
            NodeType::Add => "+".to_owned(),
            NodeType::And => "&&".to_owned(),
            NodeType::Assignment => ":=".to_owned(),
            NodeType::Colon => ":".to_owned(),
            NodeType::Column => "||".to_owned(),
            NodeType::Comma => ",".to_owned(),
            NodeType::Conditional => "?".to_owned(),
            NodeType::DashMatch => "|=".to_owned(),
            NodeType::Divide => "/".to_owned(),
            NodeType::Equal => "=".to_owned(),
            NodeType::GreaterEqual => ">=".to_owned(),
            NodeType::GreaterThan => ">".to_owned(),
            NodeType::IncludeMatch => "~=".to_owned(),
            NodeType::LessEqual => "<=".to_owned(),
            NodeType::LessThan => "<".to_owned(),
            NodeType::Modulo => "%".to_owned(),
            NodeType::Multiply => "*".to_owned(),
            NodeType::NotEqual => "!=".to_owned(),
            NodeType::Period => ".".to_owned(),
            NodeType::Power => "**".to_owned(),
            NodeType::PrefixMatch => "^=".to_owned(),
            NodeType::SubstringMatch => "*=".to_owned(),
            NodeType::Subtract => "-".to_owned(),
            NodeType::SuffixMatch => "$=".to_owned(),
            NodeType::Eof | NodeType::Unknown => String::new(),
        }
    }

    fn join_children(&self, separator: &str, show_quotes: bool) -> String {
        self.children()
            .iter()
            .map(|child| child.to_css_string(show_quotes))
            .collect::<Vec<_>>()
            .join(separator)
    }
}
