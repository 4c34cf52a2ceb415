//! # Formula syntax
//!
//! Types shared by the tokenizer, the parser and the evaluator.
//!
//! - **[tokens]** - [`Token`], [`TokenKind`], [`Span`] and [`Operator`]
//! - **[operators]** - [`BinOp`]
//!
//! ## Formula Syntax
//!
//! ```text
//! {{revenue}} - {{cost}} * 1.2 ^ (2 - {{years}})
//! ```
//!
//! A formula mixes three kinds of tokens:
//!
//! - **Numbers**: digit runs with an optional decimal fraction (`42`, `0.25`)
//! - **Operators**: `+ - * / ^ ( )`
//! - **Variable tags**: `{{name}}`, an atomic reference to a named value.
//!   Whitespace around the name is not part of it, so `{{ rev }}` names `rev`.
//!
//! Anything else (whitespace, stray punctuation, an unterminated `{{`) is
//! skipped by the tokenizer so that half-typed formulas stay editable.
pub mod operators;
pub mod tokens;

pub use operators::BinOp;
pub use tokens::{Operator, Span, TAG_CLOSE, TAG_OPEN, Token, TokenKind};
