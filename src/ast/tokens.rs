use serde::{Deserialize, Serialize};

/// Tag opening delimiter.
pub const TAG_OPEN: &str = "{{";
/// Tag closing delimiter.
pub const TAG_CLOSE: &str = "}}";

/// Half-open byte range `[start, end)` into the formula text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open containment: `start <= offset < end`.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Closed containment: `start <= offset <= end`.
    ///
    /// A cursor sitting right after the last character still touches the span.
    pub fn touches(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Classification of a formula fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Decimal literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 1.5
    /// ```
    Number,

    /// One of `+ - * / ^ ( )`
    Operator,

    /// Variable reference enclosed in double braces
    ///
    /// # Examples
    /// ```text
    /// {{revenue}}
    /// {{ cost of goods }}
    /// ```
    VariableTag,
}

/// The operator characters a formula understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition, or unary plus
    Plus,
    /// Subtraction, or unary negation
    Minus,
    /// Multiplication
    Star,
    /// Division
    Slash,
    /// Exponentiation (right-associative)
    Caret,
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Operator> {
        match ch {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            '*' => Some(Operator::Star),
            '/' => Some(Operator::Slash),
            '^' => Some(Operator::Caret),
            '(' => Some(Operator::LParen),
            ')' => Some(Operator::RParen),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Star => '*',
            Operator::Slash => '/',
            Operator::Caret => '^',
            Operator::LParen => '(',
            Operator::RParen => ')',
        }
    }

    /// True when `text` is exactly one operator character.
    pub fn is_operator_str(text: &str) -> bool {
        let mut chars = text.chars();
        matches!((chars.next(), chars.next()), (Some(ch), None) if Operator::from_char(ch).is_some())
    }
}

/// A classified fragment of formula text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text; authoritative when writing the formula back out
    pub raw: String,
    pub span: Span,
    /// Trimmed identifier between the delimiters, only for tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Token {
    pub fn number(raw: impl Into<String>, span: Span) -> Self {
        Token {
            kind: TokenKind::Number,
            raw: raw.into(),
            span,
            name: None,
        }
    }

    pub fn operator(op: Operator, span: Span) -> Self {
        Token {
            kind: TokenKind::Operator,
            raw: op.as_char().to_string(),
            span,
            name: None,
        }
    }

    pub fn variable_tag(raw: impl Into<String>, name: impl Into<String>, span: Span) -> Self {
        Token {
            kind: TokenKind::VariableTag,
            raw: raw.into(),
            span,
            name: Some(name.into()),
        }
    }

    /// The `{{name}}` text for a tag referencing `name`.
    pub fn tag_text(name: &str) -> String {
        format!("{TAG_OPEN}{name}{TAG_CLOSE}")
    }

    /// Whether `{{name}}` tokenizes back to a single tag naming `name`.
    ///
    /// The name must be non-empty, free of surrounding whitespace, and must
    /// not contain `}}` or end in `}`.
    pub fn is_valid_tag_name(name: &str) -> bool {
        !name.is_empty()
            && name.trim() == name
            && !name.contains(TAG_CLOSE)
            && !name.ends_with('}')
    }

    pub fn is_tag(&self) -> bool {
        self.kind == TokenKind::VariableTag
    }

    pub fn operator_kind(&self) -> Option<Operator> {
        if self.kind != TokenKind::Operator {
            return None;
        }
        self.raw.chars().next().and_then(Operator::from_char)
    }

    pub fn number_value(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Number => self.raw.parse().ok(),
            _ => None,
        }
    }
}
