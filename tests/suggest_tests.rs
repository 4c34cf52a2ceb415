// tests/suggest_tests.rs

use std::io::Write;

use serde_json::json;
use tag_formula::suggest::{
    JsonFileSource, QueryTracker, RawSuggestion, SourceError, StaticSource, SuggestionError,
    SuggestionSource, build_query, resolve, should_query,
};
use tag_formula::{Suggestion, VariableTable};

mod common;

fn record(id: serde_json::Value, name: &str, category: &str, value: serde_json::Value) -> RawSuggestion {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "category": category,
        "value": value,
    }))
    .unwrap()
}

fn dataset() -> StaticSource {
    common::init_logging();
    StaticSource::new(vec![
        record(json!("1"), "revenue", "finance", json!("1200")),
        record(json!("2"), "Return rate", "ops", json!("0.05")),
        record(json!(3), "cost", "finance", json!(800)),
        record(json!("4"), "label", "misc", json!("n/a")),
    ])
}

struct FailingSource;

impl SuggestionSource for FailingSource {
    async fn fetch(&self, _fragment: Option<&str>) -> Result<Vec<RawSuggestion>, SourceError> {
        Err(SourceError::Rejected("503 Service Unavailable".to_string()))
    }
}

// ============================================================================
// Query Gating
// ============================================================================

#[test]
fn test_should_query_cases() {
    let test_cases = vec![
        ("", false),
        ("+", false),
        ("-", false),
        ("^", false),
        (")", false),
        ("42", false),
        ("0", false),
        ("rev", true),
        ("4x", true),
        ("r2d2", true),
        ("_", true),
    ];

    for (input, expected) in test_cases {
        assert_eq!(should_query(input), expected, "Failed for input: {:?}", input);
    }
}

#[test]
fn test_build_query() {
    let query = build_query("rev");
    assert_eq!(query.fragment, "rev");
    assert_eq!(query.params(), vec![("search", "rev".to_string())]);
}

// ============================================================================
// Resolution
// ============================================================================

#[tokio::test]
async fn test_resolve_filters_and_parses_values() {
    let resolution = resolve(build_query("re"), &dataset()).await;
    assert!(resolution.is_ok());

    let names: Vec<&str> = resolution.candidates.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["revenue", "Return rate"]);
    assert_eq!(resolution.candidates[0].value, 1200.0);
    assert_eq!(resolution.candidates[1].value, 0.05);
    assert_eq!(resolution.candidates[1].category, "ops");
}

#[tokio::test]
async fn test_resolve_non_numeric_value_is_zero() {
    let resolution = resolve(build_query("label"), &dataset()).await;
    assert_eq!(resolution.candidates.len(), 1);
    assert_eq!(resolution.candidates[0].value, 0.0);
}

#[tokio::test]
async fn test_resolve_drops_names_that_break_tags() {
    let source = StaticSource::new(vec![
        record(json!("1"), "a}}b", "misc", json!(1)),
        record(json!("2"), "ab", "misc", json!(2)),
        record(json!("3"), "abc}", "misc", json!(3)),
    ]);
    let resolution = resolve(build_query("a"), &source).await;
    assert!(resolution.is_ok());

    let names: Vec<&str> = resolution.candidates.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["ab"]);
}

#[tokio::test]
async fn test_numeric_ids_are_stringified() {
    let resolution = resolve(build_query("cost"), &dataset()).await;
    assert_eq!(resolution.candidates[0].id, "3");
    assert_eq!(resolution.candidates[0].value, 800.0);
}

#[tokio::test]
async fn test_no_results_is_not_an_error() {
    let resolution = resolve(build_query("zzz"), &dataset()).await;
    assert!(resolution.is_ok());
    assert!(resolution.candidates.is_empty());
    assert!(resolution.into_result().unwrap().is_empty());
}

#[tokio::test]
async fn test_source_failure_is_distinct_from_no_results() {
    let resolution = resolve(build_query("rev"), &FailingSource).await;
    assert!(!resolution.is_ok());
    assert!(resolution.candidates.is_empty());
    assert_eq!(resolution.query.fragment, "rev");
    assert!(matches!(
        resolution.into_result(),
        Err(SuggestionError::SourceFailure(SourceError::Rejected(_)))
    ));
}

#[tokio::test]
async fn test_json_file_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id":"1","name":"revenue","category":"finance","value":"10"}},
            {{"id":"2","name":"cost","category":"finance","value":4}}]"#
    )
    .unwrap();

    let source = JsonFileSource::new(file.path());
    assert_eq!(source.load().await.unwrap().len(), 2);

    let resolution = resolve(build_query("COST"), &source).await;
    assert_eq!(resolution.candidates.len(), 1);
    assert_eq!(resolution.candidates[0].value, 4.0);
}

#[tokio::test]
async fn test_json_file_source_failures() {
    let missing = JsonFileSource::new("/nonexistent/suggestions.json");
    let resolution = resolve(build_query("rev"), &missing).await;
    assert!(matches!(
        resolution.error,
        Some(SuggestionError::SourceFailure(SourceError::Io(_)))
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    let broken = JsonFileSource::new(file.path());
    let resolution = resolve(build_query("rev"), &broken).await;
    assert!(matches!(
        resolution.error,
        Some(SuggestionError::SourceFailure(SourceError::Json(_)))
    ));
}

#[tokio::test]
async fn test_variable_table_from_dataset() {
    let records = dataset().fetch(None).await.unwrap();
    let suggestions: Vec<Suggestion> = records.into_iter().map(Into::into).collect();
    let table = VariableTable::from_suggestions(&suggestions);

    assert_eq!(table.len(), 4);
    assert_eq!(table.get("revenue"), 1200.0);
    assert_eq!(table.get("label"), 0.0);
    assert_eq!(table.get("missing"), 0.0);
}

// ============================================================================
// Staleness
// ============================================================================

#[tokio::test]
async fn test_stale_resolution_is_discarded_even_if_last() {
    let source = dataset();
    let mut tracker = QueryTracker::new();

    let old = tracker.begin("re").unwrap();
    let new = tracker.begin("rev").unwrap();

    // The newer query answers first, the older one arrives last
    let fresh = resolve(new, &source).await;
    let stale = resolve(old, &source).await;

    let fresh = tracker.accept(fresh).expect("current fragment is accepted");
    assert_eq!(fresh.candidates.len(), 1);
    assert!(tracker.accept(stale).is_none());
}

#[tokio::test]
async fn test_non_query_fragment_clears_tracker() {
    let source = dataset();
    let mut tracker = QueryTracker::new();

    let query = tracker.begin("rev").unwrap();
    assert_eq!(tracker.begin("42"), None);
    assert_eq!(tracker.current(), None);
    assert!(tracker.accept(resolve(query, &source).await).is_none());
}

#[tokio::test]
async fn test_retyping_same_fragment_keeps_it_current() {
    let source = dataset();
    let mut tracker = QueryTracker::new();

    let first = tracker.begin("cost").unwrap();
    tracker.begin("cos");
    tracker.begin("cost");
    assert!(tracker.accept(resolve(first, &source).await).is_some());
}
