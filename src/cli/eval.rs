//! Evaluate a formula against variables from flags and files

use std::path::PathBuf;

use super::{CliError, load_variables};
use crate::{VariableTable, evaluate, tokenize};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// Formula text
    pub formula: String,
    /// Variables from `--var name=value`, applied after the file
    pub vars: Vec<(String, f64)>,
    /// JSON file with variables or suggestion records
    pub vars_file: Option<PathBuf>,
}

/// Execute an eval operation
pub fn execute_eval(options: &EvalOptions) -> Result<f64, CliError> {
    let mut variables = match &options.vars_file {
        Some(path) => load_variables(path)?,
        None => VariableTable::new(),
    };
    variables.extend(options.vars.iter().cloned());

    let tokens = tokenize(&options.formula);
    Ok(evaluate(&tokens, &variables)?)
}

/// Formats a result the way a spreadsheet user expects to read it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}
