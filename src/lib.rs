pub mod ast;
pub mod boundary;
pub mod cli;
pub mod evaluator;
pub mod parser;
pub mod session;
pub mod suggest;
pub mod tokenizer;
pub mod variables;

pub use ast::{Operator, Span, Token, TokenKind};
pub use boundary::tag_at;
pub use evaluator::{EvalError, Evaluator, evaluate, evaluate_or_nan};
pub use session::{Deletion, FormulaSession, Fragment};
pub use suggest::{
    QueryTracker, Resolution, Suggestion, SuggestionError, SuggestionQuery, SuggestionSource,
    build_query, resolve, should_query,
};
pub use tokenizer::{Tokenizer, render, tokenize};
pub use variables::VariableTable;
