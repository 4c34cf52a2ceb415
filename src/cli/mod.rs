//! CLI support for tag-formula
//!
//! Each `tagf` subcommand is a plain function over an options struct, so the
//! same operations can be embedded in other tools.

mod convert;
mod edit;
mod eval;
mod input;
mod suggest;

pub use convert::{json_to_table, load_variables, parse_assignment};
pub use edit::{BackspaceOptions, EditOutcome, execute_backspace, execute_tag_at, execute_tokenize};
pub use eval::{EvalOptions, execute_eval, format_number};
pub use input::{STDIN_ARG, read_formula};
pub use suggest::{SuggestOptions, execute_suggest};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("{0}")]
    Suggestion(#[from] crate::SuggestionError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// `--var` argument not of the form `name=value`
    #[error("Invalid variable assignment '{0}' (expected name=value)")]
    InvalidAssignment(String),

    /// Variables file is neither an object nor an array of records
    #[error("Variables file must hold a JSON object or an array of suggestion records")]
    InvalidVariables,

    #[error("No formula provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}
