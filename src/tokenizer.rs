use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Operator, Span, TAG_CLOSE, Token};

/// `{{`, the shortest run of anything, `}}`, anchored at the scan position.
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A\{\{(.*?)\}\}").expect("tag pattern is valid"));

/// Left-to-right scanner over formula text.
///
/// The tokenizer never fails: characters that cannot start a token are
/// skipped. Positions are byte offsets into the input.
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    /// Start of the last `}}` in the input; no tag can begin after it
    last_close: Option<usize>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            position: 0,
            last_close: input.rfind(TAG_CLOSE),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn read_tag(&mut self) -> Option<Token> {
        // An opener with no closer after it would rescan to the end every time
        if self.last_close.is_none_or(|close| close < self.position + 2) {
            return None;
        }

        let captures = TAG_PATTERN.captures(self.rest())?;
        let whole = captures.get(0)?;
        let inner = captures.get(1).map_or("", |m| m.as_str());

        let start = self.position;
        self.position += whole.end();
        Some(Token::variable_tag(
            whole.as_str(),
            inner.trim(),
            Span::new(start, self.position),
        ))
    }

    fn read_digits(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.position;
        self.read_digits();

        if self.current_char() == Some('.') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.read_digits();
        }

        Token::number(&self.input[start..self.position], Span::new(start, self.position))
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        while let Some(ch) = self.current_char() {
            if ch == '{'
                && let Some(tag) = self.read_tag()
            {
                return Some(tag);
            }

            if ch.is_ascii_digit() {
                return Some(self.read_number());
            }

            if let Some(op) = Operator::from_char(ch) {
                let start = self.position;
                self.advance();
                return Some(Token::operator(op, Span::new(start, self.position)));
            }

            if !ch.is_whitespace() {
                trace!("skipping unrecognized character {:?} at {}", ch, self.position);
            }
            self.advance();
        }
        None
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Splits formula text into tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text).collect()
}

/// Writes tokens back out as formula text.
///
/// Each token's `raw` text lands at its `span.start`; gaps left by skipped
/// characters become spaces, so tokenizing the result gives the same tokens
/// back.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        if out.len() < token.span.start {
            out.push_str(&" ".repeat(token.span.start - out.len()));
        }
        out.push_str(&token.raw);
    }
    out
}
