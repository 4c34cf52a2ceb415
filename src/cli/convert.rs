//! JSON -> VariableTable conversion utilities

use std::path::Path;

use super::CliError;
use crate::{
    Suggestion, VariableTable,
    suggest::RawSuggestion,
    variables::{parse_float_prefix, parse_numeric},
};

/// Builds a table from either `{"name": value, ...}` or an array of
/// suggestion records.
pub fn json_to_table(v: serde_json::Value) -> Result<VariableTable, CliError> {
    match v {
        serde_json::Value::Object(obj) => Ok(obj
            .into_iter()
            .map(|(name, value)| {
                let number = parse_numeric(&value);
                (name, number)
            })
            .collect()),
        serde_json::Value::Array(_) => {
            let records: Vec<RawSuggestion> = serde_json::from_value(v)?;
            let suggestions: Vec<Suggestion> = records.into_iter().map(Suggestion::from).collect();
            Ok(VariableTable::from_suggestions(&suggestions))
        }
        _ => Err(CliError::InvalidVariables),
    }
}

pub fn load_variables(path: &Path) -> Result<VariableTable, CliError> {
    let text = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    json_to_table(json)
}

/// Parses `name=value`; the value is read leniently like any other payload.
pub fn parse_assignment(arg: &str) -> Result<(String, f64), CliError> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), parse_float_prefix(value)))
        }
        _ => Err(CliError::InvalidAssignment(arg.to_string())),
    }
}
