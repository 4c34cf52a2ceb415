//! Look up suggestions from a JSON file

use std::path::PathBuf;

use log::info;

use super::CliError;
use crate::{Suggestion, should_query, suggest::JsonFileSource};

/// Options for the suggest command
#[derive(Debug, Clone)]
pub struct SuggestOptions {
    pub fragment: String,
    /// JSON array of suggestion records
    pub source: PathBuf,
}

/// Execute a suggest operation.
///
/// A fragment that does not warrant a lookup gives an empty list without
/// touching the source.
pub async fn execute_suggest(options: &SuggestOptions) -> Result<Vec<Suggestion>, CliError> {
    if !should_query(&options.fragment) {
        info!("no lookup for {:?}", options.fragment);
        return Ok(Vec::new());
    }

    let source = JsonFileSource::new(options.source.clone());
    let query = crate::build_query(&options.fragment);
    Ok(crate::resolve(query, &source).await.into_result()?)
}
