//! Suggestion lookups for the fragment being typed.
//!
//! While the user types a word that is neither an operator nor a plain
//! integer, candidates are fetched from a [`SuggestionSource`] and offered as
//! tags. Accepting one inserts `{{name}}` into the formula.

mod source;
mod tracker;

pub use source::{JsonFileSource, StaticSource, SuggestionSource};
pub use tracker::QueryTracker;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ast::Operator, ast::Token, variables::parse_numeric};

static INTEGER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("integer pattern is valid"));

/// Failure reported by a suggestion source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid suggestion data: {0}")]
    Json(#[from] serde_json::Error),

    /// Source-specific failure (rejected request, bad status, ...)
    #[error("{0}")]
    Rejected(String),
}

/// Errors surfaced to the caller of [`resolve`].
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Suggestion source failed: {0}")]
    SourceFailure(#[from] SourceError),
}

/// A record as delivered by a suggestion source.
///
/// Nothing about the payload shape is trusted: every field may be missing,
/// and `id`/`value` may be strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSuggestion {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// A candidate variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    /// Identifier placed between the tag delimiters
    pub name: String,
    /// Display grouping, irrelevant to evaluation
    pub category: String,
    pub value: f64,
}

impl Suggestion {
    /// False when the name cannot be written as a tag.
    pub fn is_insertable(&self) -> bool {
        Token::is_valid_tag_name(&self.name)
    }

    /// Text inserted into the formula when this suggestion is accepted.
    pub fn apply_text(&self) -> String {
        Token::tag_text(&self.name)
    }
}

impl From<RawSuggestion> for Suggestion {
    fn from(raw: RawSuggestion) -> Self {
        let id = match raw.id {
            serde_json::Value::String(s) => s,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };

        Suggestion {
            id,
            name: raw.name.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            value: parse_numeric(&raw.value),
        }
    }
}

/// Parameters of one suggestion lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionQuery {
    pub fragment: String,
}

impl SuggestionQuery {
    /// Query-string pairs for sources reached over HTTP.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![("search", self.fragment.clone())]
    }
}

/// Whether `fragment` warrants a lookup.
///
/// Empty input, a lone operator, and a pure integer are not worth asking about.
pub fn should_query(fragment: &str) -> bool {
    !(fragment.is_empty()
        || Operator::is_operator_str(fragment)
        || INTEGER_PATTERN.is_match(fragment))
}

pub fn build_query(fragment: &str) -> SuggestionQuery {
    SuggestionQuery {
        fragment: fragment.to_string(),
    }
}

/// Outcome of a lookup.
///
/// A failure is reported in `error` next to an empty candidate list, so the
/// caller can tell "the source broke" apart from "nothing matched".
#[derive(Debug)]
pub struct Resolution {
    pub query: SuggestionQuery,
    pub candidates: Vec<Suggestion>,
    pub error: Option<SuggestionError>,
}

impl Resolution {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Vec<Suggestion>, SuggestionError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.candidates),
        }
    }
}

/// Fetches candidates for `query` from `source`.
///
/// Records whose name cannot be written as a tag are left out.
pub async fn resolve<S: SuggestionSource>(query: SuggestionQuery, source: &S) -> Resolution {
    let fetched = source.fetch(Some(query.fragment.as_str())).await;
    match fetched {
        Ok(records) => {
            let candidates: Vec<Suggestion> = records
                .into_iter()
                .map(Suggestion::from)
                .filter(|candidate| {
                    let keep = candidate.is_insertable();
                    if !keep {
                        debug!("dropping suggestion with unusable name {:?}", candidate.name);
                    }
                    keep
                })
                .collect();
            debug!(
                "{} suggestion(s) for {:?}",
                candidates.len(),
                query.fragment
            );
            Resolution {
                query,
                candidates,
                error: None,
            }
        }
        Err(e) => {
            warn!("suggestion lookup for {:?} failed: {}", query.fragment, e);
            Resolution {
                query,
                candidates: Vec::new(),
                error: Some(SuggestionError::SourceFailure(e)),
            }
        }
    }
}
