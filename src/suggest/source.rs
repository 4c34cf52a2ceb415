use std::future::Future;
use std::path::PathBuf;

use log::trace;

use super::{RawSuggestion, SourceError};

/// Asynchronous provider of suggestion records.
///
/// Implementations may be slow or fail; a failure must come back as
/// `Err`, never as an empty list.
pub trait SuggestionSource {
    fn fetch(
        &self,
        fragment: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RawSuggestion>, SourceError>> + Send;
}

/// Case-insensitive substring match on the record name.
fn matches_fragment(record: &RawSuggestion, fragment: Option<&str>) -> bool {
    match fragment {
        None | Some("") => true,
        Some(fragment) => record
            .name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&fragment.to_lowercase())),
    }
}

fn filter_records(records: &[RawSuggestion], fragment: Option<&str>) -> Vec<RawSuggestion> {
    records
        .iter()
        .filter(|r| matches_fragment(r, fragment))
        .cloned()
        .collect()
}

/// A fixed dataset held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<RawSuggestion>,
}

impl StaticSource {
    pub fn new(records: Vec<RawSuggestion>) -> Self {
        StaticSource { records }
    }

    pub fn records(&self) -> &[RawSuggestion] {
        &self.records
    }
}

impl SuggestionSource for StaticSource {
    async fn fetch(&self, fragment: Option<&str>) -> Result<Vec<RawSuggestion>, SourceError> {
        Ok(filter_records(&self.records, fragment))
    }
}

/// A JSON array of records read from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    /// Reads every record in the file, unfiltered.
    pub async fn load(&self) -> Result<Vec<RawSuggestion>, SourceError> {
        trace!("reading suggestions from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl SuggestionSource for JsonFileSource {
    async fn fetch(&self, fragment: Option<&str>) -> Result<Vec<RawSuggestion>, SourceError> {
        let records = self.load().await?;
        Ok(filter_records(&records, fragment))
    }
}
