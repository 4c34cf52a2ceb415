use log::debug;

use super::{Resolution, SuggestionQuery, build_query, should_query};

/// Keeps only the answer to the most recent lookup.
///
/// Each edit calls [`begin`](QueryTracker::begin) with the fragment now under
/// the cursor. A resolution is accepted only if it answers that fragment;
/// results for fragments the user has typed past are dropped whatever order
/// they arrive in.
#[derive(Debug, Clone, Default)]
pub struct QueryTracker {
    current: Option<String>,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `fragment` as current and returns the query to issue, if any.
    ///
    /// A fragment that does not warrant a lookup clears the current one, so
    /// every outstanding result becomes stale.
    pub fn begin(&mut self, fragment: &str) -> Option<SuggestionQuery> {
        if should_query(fragment) {
            self.current = Some(fragment.to_string());
            Some(build_query(fragment))
        } else {
            self.current = None;
            None
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_current(&self, query: &SuggestionQuery) -> bool {
        self.current.as_deref() == Some(query.fragment.as_str())
    }

    /// Passes `resolution` through if it is still current, otherwise drops it.
    pub fn accept(&self, resolution: Resolution) -> Option<Resolution> {
        if self.is_current(&resolution.query) {
            Some(resolution)
        } else {
            debug!(
                "discarding stale suggestions for {:?}",
                resolution.query.fragment
            );
            None
        }
    }
}
