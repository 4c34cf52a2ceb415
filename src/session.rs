use log::trace;
use serde::Serialize;

use crate::{
    ast::{Span, Token},
    boundary::{tag_at, tag_enclosing},
    evaluator::{EvalError, evaluate},
    suggest::Suggestion,
    tokenizer::tokenize,
    variables::VariableTable,
};

/// What a backspace removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "span", rename_all = "snake_case")]
pub enum Deletion {
    /// A whole tag
    Tag(Span),
    /// One character before the cursor
    Char(Span),
    /// Nothing: cursor at the start and no tag touching it
    None,
}

/// The word being typed at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub span: Span,
}

/// Formula text plus cursor, owned by whoever drives the editor.
///
/// Every method recomputes tokens from the current text; nothing is cached
/// between edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaSession {
    text: String,
    cursor: usize,
}

impl FormulaSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        FormulaSession { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamped to the text and snapped back to a character
    /// boundary.
    pub fn set_cursor(&mut self, offset: usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.cursor = offset;
    }

    pub fn tokens(&self) -> Vec<Token> {
        tokenize(&self.text)
    }

    /// Inserts `input` at the cursor and moves the cursor past it.
    pub fn insert(&mut self, input: &str) {
        self.text.insert_str(self.cursor, input);
        self.cursor += input.len();
    }

    /// Deletes backward from the cursor.
    ///
    /// A tag touching the cursor goes away whole and the cursor lands where
    /// it started; otherwise one character is removed.
    pub fn backspace(&mut self) -> Deletion {
        if let Some(span) = tag_at(&self.tokens(), self.cursor) {
            trace!("removing tag {:?}", &self.text[span.range()]);
            self.text.replace_range(span.range(), "");
            self.cursor = span.start;
            return Deletion::Tag(span);
        }

        let Some((start, _)) = self.text[..self.cursor].char_indices().next_back() else {
            return Deletion::None;
        };

        let span = Span::new(start, self.cursor);
        self.text.replace_range(span.range(), "");
        self.cursor = start;
        Deletion::Char(span)
    }

    /// The run of word characters (alphanumeric or `_`) ending at the cursor.
    ///
    /// `None` when the run is empty or the cursor sits inside a tag.
    pub fn current_fragment(&self) -> Option<Fragment> {
        if tag_enclosing(&self.tokens(), self.cursor).is_some() {
            return None;
        }

        let before = &self.text[..self.cursor];
        let start = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
            .last()
            .map(|(i, _)| i)?;

        Some(Fragment {
            text: before[start..].to_string(),
            span: Span::new(start, self.cursor),
        })
    }

    /// Replaces the current fragment with the suggestion's tag.
    ///
    /// Without a fragment the tag is inserted at the cursor. The cursor ends up
    /// right after the tag. A suggestion whose name cannot be written as a tag
    /// leaves the text untouched and returns `false`.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) -> bool {
        if !suggestion.is_insertable() {
            return false;
        }

        let span = self
            .current_fragment()
            .map_or(Span::new(self.cursor, self.cursor), |f| f.span);
        let tag = suggestion.apply_text();

        self.text.replace_range(span.range(), &tag);
        self.cursor = span.start + tag.len();
        true
    }

    /// Evaluates the current text; called on commit (blur, Enter).
    pub fn evaluate(&self, variables: &VariableTable) -> Result<f64, EvalError> {
        evaluate(&self.tokens(), variables)
    }
}
