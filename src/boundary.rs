//! Tag atomicity under backward deletion.
//!
//! A tag is one unit for the editor: a backspace whose cursor touches a tag
//! removes the whole `{{...}}` text rather than a single brace.

use crate::ast::{Span, Token};

/// Span of the tag a backward delete at `offset` should remove.
///
/// The first tag with `start <= offset <= end` wins. `None` tells the caller
/// to fall back to ordinary single-character deletion.
pub fn tag_at(tokens: &[Token], offset: usize) -> Option<Span> {
    tokens
        .iter()
        .filter(|token| token.is_tag())
        .map(|token| token.span)
        .find(|span| span.touches(offset))
}

/// Span of the tag strictly enclosing `offset`, excluding both edges.
///
/// Used to tell whether a cursor is positioned inside a tag's text, where no
/// new input fragment can be in progress.
pub fn tag_enclosing(tokens: &[Token], offset: usize) -> Option<Span> {
    tokens
        .iter()
        .filter(|token| token.is_tag())
        .map(|token| token.span)
        .find(|span| span.start < offset && offset < span.end)
}
