//! Tokenize formulas and replay editor operations

use serde::Serialize;

use crate::{Deletion, FormulaSession, Span, Token, tag_at, tokenize};

pub fn execute_tokenize(formula: &str) -> Vec<Token> {
    tokenize(formula)
}

pub fn execute_tag_at(formula: &str, offset: usize) -> Option<Span> {
    tag_at(&tokenize(formula), offset)
}

/// Options for the backspace command
#[derive(Debug, Clone, Default)]
pub struct BackspaceOptions {
    pub formula: String,
    /// Cursor position; the end of the formula when absent
    pub cursor: Option<usize>,
}

/// Editor state after an operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditOutcome {
    pub text: String,
    pub cursor: usize,
    pub deleted: Deletion,
}

pub fn execute_backspace(options: &BackspaceOptions) -> EditOutcome {
    let mut session = FormulaSession::with_text(options.formula.clone());
    if let Some(cursor) = options.cursor {
        session.set_cursor(cursor);
    }

    let deleted = session.backspace();
    EditOutcome {
        text: session.text().to_string(),
        cursor: session.cursor(),
        deleted,
    }
}
