//! CSS Syntax Module Level 3: Tokenization of value expressions.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#tokenization>
//!
//! [`tokenize`] turns the text of a declaration value into a LIST of
//! [`Node`] tokens ready for the expression evaluator. Delimiters are mapped
//! to operator tokens, multi-character operators (`**`, `<=`, `!=`, `&&`,
//! `:=`, ...) are merged, function arguments are grouped per comma, and
//! blocks become nodes holding their content.

#![forbid(unsafe_code)]

use core::error::Error;
use core::fmt;
use core::mem;
use css_values_units::{Node, NodeType, Position, UnicodeRange};
use cssparser::ParseErrorKind;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::Token;
use cssparser::UnicodeRange as CssUnicodeRange;
use log::trace;

/// Deepest nesting of `(`, `[`, `{` blocks and function arguments.
pub const MAX_BLOCK_DEPTH: usize = 256;

/// Failure to tokenize value text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenizeError {
    /// A token that cannot appear in a value expression.
    UnexpectedToken(String),
    /// A string literal was not terminated on its line.
    BadString,
    /// An unquoted `url()` contained invalid characters.
    BadUrl,
    /// A block ended before its content could be read.
    UnexpectedEnd,
    /// Blocks nested deeper than [`MAX_BLOCK_DEPTH`].
    TooDeeplyNested,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken(token) => {
                write!(formatter, "unexpected token \"{token}\" in expression.")
            }
            Self::BadString => formatter.write_str("unterminated string in expression."),
            Self::BadUrl => formatter.write_str("invalid url() in expression."),
            Self::UnexpectedEnd => formatter.write_str("unexpected end of expression."),
            Self::TooDeeplyNested => write!(
                formatter,
                "blocks nested deeper than {MAX_BLOCK_DEPTH} levels in expression."
            ),
        }
    }
}

impl Error for TokenizeError {}

/// Tokenize `text` into a LIST node of value tokens.
///
/// Comments are dropped. Whitespace survives only where it separates list
/// items; next to a symbolic operator, comma, colon or `?` it is removed.
///
/// # Errors
/// Returns a [`TokenizeError`] for bad strings or urls, `;`, `<!--`, `-->`,
/// at-keywords, unbalanced closing brackets, unknown delimiters, and blocks
/// nested deeper than [`MAX_BLOCK_DEPTH`].
pub fn tokenize(text: &str, position: &Position) -> Result<Node, TokenizeError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let tokens = tokenize_sequence(&mut parser, position, 0)?;
    trace!("tokenized {} value tokens from {position}", tokens.len());
    Ok(Node::container(NodeType::List, position.clone(), tokens))
}

/// Position of the parser's current line relative to `base`.
fn here(parser: &Parser<'_, '_>, base: &Position) -> Position {
    Position::new(
        base.file.clone(),
        base.line + parser.current_source_location().line,
    )
}

/// Consume the next token when it is the delimiter `expected`.
fn eat_delim(parser: &mut Parser<'_, '_>, expected: char) -> bool {
    let state = parser.state();
    if matches!(parser.next_including_whitespace_and_comments(), Ok(Token::Delim(found)) if *found == expected)
    {
        return true;
    }
    parser.reset(&state);
    false
}

/// Consume the next token when it is an identifier, returning its text.
fn eat_ident(parser: &mut Parser<'_, '_>) -> Option<String> {
    let state = parser.state();
    if let Ok(Token::Ident(name)) = parser.next_including_whitespace_and_comments() {
        return Some(name.to_string());
    }
    parser.reset(&state);
    None
}

/// Tokens around which whitespace carries no meaning.
fn is_operator(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::Add
            | NodeType::And
            | NodeType::Assignment
            | NodeType::Colon
            | NodeType::Column
            | NodeType::Comma
            | NodeType::Conditional
            | NodeType::DashMatch
            | NodeType::Divide
            | NodeType::Equal
            | NodeType::GreaterEqual
            | NodeType::GreaterThan
            | NodeType::IncludeMatch
            | NodeType::LessEqual
            | NodeType::LessThan
            | NodeType::Modulo
            | NodeType::Multiply
            | NodeType::NotEqual
            | NodeType::Period
            | NodeType::Power
            | NodeType::PrefixMatch
            | NodeType::SubstringMatch
            | NodeType::Subtract
            | NodeType::SuffixMatch
    )
}

/// Drop leading, trailing, repeated and operator-adjacent whitespace.
fn strip_whitespace(tokens: Vec<Node>) -> Vec<Node> {
    let mut kept: Vec<Node> = Vec::with_capacity(tokens.len());
    let mut pending_space: Option<Node> = None;
    for token in tokens {
        if token.is(NodeType::Whitespace) {
            let after_operator = kept.last().is_none_or(|last| is_operator(last.node_type()));
            if !after_operator && pending_space.is_none() {
                pending_space = Some(token);
            }
            continue;
        }
        if let Some(space) = pending_space.take()
            && !is_operator(token.node_type())
        {
            kept.push(space);
        }
        kept.push(token);
    }
    kept
}

/// Split function content on commas into ARG groups.
fn argify(tokens: Vec<Node>, position: &Position) -> Vec<Node> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut args = Vec::new();
    let mut current = Node::new(NodeType::Arg, position.clone());
    for token in tokens {
        if token.is(NodeType::Comma) {
            let finished = mem::replace(
                &mut current,
                Node::new(NodeType::Arg, token.position().clone()),
            );
            args.push(finished);
        } else {
            current.add_child(token);
        }
    }
    args.push(current);
    args
}

/// Tokenize the content of the block the parser just returned.
fn nested_sequence(
    parser: &mut Parser<'_, '_>,
    base: &Position,
    depth: usize,
) -> Result<Vec<Node>, TokenizeError> {
    if depth >= MAX_BLOCK_DEPTH {
        return Err(TokenizeError::TooDeeplyNested);
    }
    parser
        .parse_nested_block(|nested| {
            tokenize_sequence(nested, base, depth + 1).map_err(|error| nested.new_custom_error(error))
        })
        .map_err(|error| match error.kind {
            ParseErrorKind::Custom(inner) => inner,
            ParseErrorKind::Basic(_) => TokenizeError::UnexpectedEnd,
        })
}

/// Numeric text of a token, without its unit or `%` sign.
fn number_text<'text>(token_text: &'text str, suffix: &str) -> &'text str {
    token_text
        .strip_suffix(suffix)
        .or_else(|| {
            let split = token_text.len().checked_sub(suffix.len())?;
            token_text.get(..split)
        })
        .unwrap_or(token_text)
}

/// Build an INTEGER or DECIMAL_NUMBER from source text, keeping `f64` precision.
fn number_node(text: &str, fallback: f32, is_integer: bool, position: Position) -> Node {
    if is_integer && let Ok(integer) = text.parse::<i64>() {
        return Node::integer(position, integer);
    }
    let decimal = text.parse::<f64>().unwrap_or_else(|_| f64::from(fallback));
    Node::decimal(position, decimal)
}

/// Map a delimiter, merging it with the following delimiter when they form an operator.
fn delim_node(
    parser: &mut Parser<'_, '_>,
    delim: char,
    position: Position,
) -> Result<Node, TokenizeError> {
    let node_type = match delim {
        '+' => NodeType::Add,
        '-' => NodeType::Subtract,
        '/' => NodeType::Divide,
        '%' => NodeType::Modulo,
        '?' => NodeType::Conditional,
        '.' => NodeType::Period,
        '*' if eat_delim(parser, '*') => NodeType::Power,
        '*' => NodeType::Multiply,
        '<' if eat_delim(parser, '=') => NodeType::LessEqual,
        '<' => NodeType::LessThan,
        '>' if eat_delim(parser, '=') => NodeType::GreaterEqual,
        '>' => NodeType::GreaterThan,
        '&' if eat_delim(parser, '&') => NodeType::And,
        '|' if eat_delim(parser, '|') => NodeType::Column,
        '=' if eat_delim(parser, '=') => {
            return Ok(Node::text(NodeType::Equal, position, "=="));
        }
        '=' => NodeType::Equal,
        '!' if eat_delim(parser, '=') => NodeType::NotEqual,
        '!' => {
            let name = eat_ident(parser).ok_or_else(|| TokenizeError::UnexpectedToken("!".to_owned()))?;
            return Ok(Node::text(NodeType::Exclamation, position, name.to_ascii_lowercase()));
        }
        '$' => {
            let name = eat_ident(parser).ok_or_else(|| TokenizeError::UnexpectedToken("$".to_owned()))?;
            return Ok(Node::text(NodeType::Variable, position, name));
        }
        other => return Err(TokenizeError::UnexpectedToken(other.to_string())),
    };
    Ok(Node::new(node_type, position))
}

/// Tokenize until the parser (or nested block) is exhausted.
/// `depth` counts the blocks enclosing this sequence.
fn tokenize_sequence(
    parser: &mut Parser<'_, '_>,
    base: &Position,
    depth: usize,
) -> Result<Vec<Node>, TokenizeError> {
    let mut tokens = Vec::new();
    loop {
        let state = parser.state();
        let start = parser.position();
        let position = here(parser, base);
        let Ok(token) = parser.next_including_whitespace_and_comments() else {
            break;
        };
        let node = match token.clone() {
            Token::Comment(_) => continue,
            Token::WhiteSpace(_) => Node::new(NodeType::Whitespace, position),
            Token::Ident(name) if name.eq_ignore_ascii_case("u") => {
                parser.reset(&state);
                if let Ok(range) = CssUnicodeRange::parse(parser) {
                    Node::unicode_range(position, UnicodeRange::new(range.start, range.end))
                } else {
                    parser.reset(&state);
                    let ident = eat_ident(parser).unwrap_or_else(|| name.to_string());
                    Node::text(NodeType::Identifier, position, ident)
                }
            }
            Token::Ident(name) => Node::text(NodeType::Identifier, position, name.to_string()),
            Token::QuotedString(text) => Node::text(NodeType::String, position, text.to_string()),
            Token::Hash(name) | Token::IDHash(name) => Node::text(NodeType::Hash, position, name.to_string()),
            Token::UnquotedUrl(url) => Node::text(NodeType::Url, position, url.to_string()),
            Token::Number { value, int_value, .. } => {
                number_node(parser.slice_from(start), value, int_value.is_some(), position)
            }
            Token::Dimension { value, int_value, unit, .. } => {
                let text = number_text(parser.slice_from(start), &unit);
                number_node(text, value, int_value.is_some(), position)
                    .with_dimension(unit.to_ascii_lowercase())
            }
            Token::Percentage { unit_value, .. } => {
                let text = number_text(parser.slice_from(start), "%");
                let fraction = text
                    .parse::<f64>()
                    .map_or_else(|_| f64::from(unit_value), |percent| percent / 100.0);
                Node::percent(position, fraction)
            }
            Token::Comma => Node::new(NodeType::Comma, position),
            Token::Colon if eat_delim(parser, '=') => Node::new(NodeType::Assignment, position),
            Token::Colon => Node::new(NodeType::Colon, position),
            Token::IncludeMatch => Node::new(NodeType::IncludeMatch, position),
            Token::DashMatch => Node::new(NodeType::DashMatch, position),
            Token::PrefixMatch => Node::new(NodeType::PrefixMatch, position),
            Token::SuffixMatch => Node::new(NodeType::SuffixMatch, position),
            Token::SubstringMatch => Node::new(NodeType::SubstringMatch, position),
            Token::Delim(delim) => delim_node(parser, delim, position)?,
            Token::Function(name) => {
                let content = nested_sequence(parser, base, depth)?;
                if name.eq_ignore_ascii_case("url")
                    && let [single] = content.as_slice()
                    && single.is(NodeType::String)
                {
                    Node::text(NodeType::Url, position, single.get_string())
                } else {
                    let mut function = Node::text(NodeType::Function, position.clone(), name.to_string());
                    for arg in argify(content, &position) {
                        function.add_child(arg);
                    }
                    function
                }
            }
            Token::ParenthesisBlock => {
                let content = nested_sequence(parser, base, depth)?;
                Node::container(NodeType::OpenParenthesis, position, content)
            }
            Token::SquareBracketBlock => {
                let content = nested_sequence(parser, base, depth)?;
                Node::container(NodeType::OpenSquareBracket, position, content)
            }
            Token::CurlyBracketBlock => {
                let content = nested_sequence(parser, base, depth)?;
                Node::container(NodeType::OpenCurlyBracket, position, content)
            }
            Token::BadString(_) => return Err(TokenizeError::BadString),
            Token::BadUrl(_) => return Err(TokenizeError::BadUrl),
            Token::AtKeyword(_)
            | Token::Semicolon
            | Token::CDO
            | Token::CDC
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::CloseCurlyBracket => {
                return Err(TokenizeError::UnexpectedToken(
                    parser.slice_from(start).to_owned(),
                ));
            }
        };
        tokens.push(node);
    }
    Ok(strip_whitespace(tokens))
}
