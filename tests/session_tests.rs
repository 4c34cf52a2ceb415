// tests/session_tests.rs

use tag_formula::{Deletion, FormulaSession, Span, Suggestion, VariableTable};

fn suggestion(name: &str, value: f64) -> Suggestion {
    Suggestion {
        id: name.to_string(),
        name: name.to_string(),
        category: "test".to_string(),
        value,
    }
}

// ============================================================================
// Backspace
// ============================================================================

#[test]
fn test_backspace_after_tag_removes_whole_tag() {
    let mut session = FormulaSession::with_text("1 + {{revenue}}");
    assert_eq!(session.backspace(), Deletion::Tag(Span::new(4, 15)));
    assert_eq!(session.text(), "1 + ");
    assert_eq!(session.cursor(), 4);
}

#[test]
fn test_backspace_inside_tag_removes_whole_tag() {
    let mut session = FormulaSession::with_text("{{abc}}*2");
    session.set_cursor(4);
    assert_eq!(session.backspace(), Deletion::Tag(Span::new(0, 7)));
    assert_eq!(session.text(), "*2");
    assert_eq!(session.cursor(), 0);
}

#[test]
fn test_backspace_at_tag_start_removes_tag() {
    let mut session = FormulaSession::with_text("{{x}}");
    session.set_cursor(0);
    assert_eq!(session.backspace(), Deletion::Tag(Span::new(0, 5)));
    assert_eq!(session.text(), "");
}

#[test]
fn test_backspace_outside_tags_removes_one_character() {
    let mut session = FormulaSession::with_text("12 + 3");
    assert_eq!(session.backspace(), Deletion::Char(Span::new(5, 6)));
    assert_eq!(session.text(), "12 + ");
    assert_eq!(session.backspace(), Deletion::Char(Span::new(4, 5)));
    assert_eq!(session.text(), "12 +");
}

#[test]
fn test_backspace_on_multibyte_character() {
    let mut session = FormulaSession::with_text("1é");
    assert_eq!(session.backspace(), Deletion::Char(Span::new(1, 3)));
    assert_eq!(session.text(), "1");
}

#[test]
fn test_backspace_at_start_of_plain_text() {
    let mut session = FormulaSession::with_text("1+2");
    session.set_cursor(0);
    assert_eq!(session.backspace(), Deletion::None);
    assert_eq!(session.text(), "1+2");

    let mut empty = FormulaSession::new();
    assert_eq!(empty.backspace(), Deletion::None);
}

#[test]
fn test_unterminated_tag_deletes_characters() {
    let mut session = FormulaSession::with_text("{{ab");
    assert_eq!(session.backspace(), Deletion::Char(Span::new(3, 4)));
    assert_eq!(session.text(), "{{a");
}

// ============================================================================
// Cursor and Insertion
// ============================================================================

#[test]
fn test_set_cursor_clamps_and_snaps() {
    let mut session = FormulaSession::with_text("aé");
    session.set_cursor(100);
    assert_eq!(session.cursor(), 3);
    session.set_cursor(2);
    assert_eq!(session.cursor(), 1);
}

#[test]
fn test_insert_at_cursor() {
    let mut session = FormulaSession::with_text("1+3");
    session.set_cursor(2);
    session.insert("2*");
    assert_eq!(session.text(), "1+2*3");
    assert_eq!(session.cursor(), 4);
}

// ============================================================================
// Fragments and Suggestions
// ============================================================================

#[test]
fn test_current_fragment() {
    let session = FormulaSession::with_text("2 * rev");
    let fragment = session.current_fragment().unwrap();
    assert_eq!(fragment.text, "rev");
    assert_eq!(fragment.span, Span::new(4, 7));
}

#[test]
fn test_no_fragment_after_operator_or_tag() {
    assert_eq!(FormulaSession::with_text("2 *").current_fragment(), None);
    assert_eq!(FormulaSession::with_text("2 * ").current_fragment(), None);
    assert_eq!(FormulaSession::with_text("{{a}}").current_fragment(), None);
    assert_eq!(FormulaSession::new().current_fragment(), None);
}

#[test]
fn test_no_fragment_inside_tag() {
    let mut session = FormulaSession::with_text("{{revenue}}");
    session.set_cursor(5);
    assert_eq!(session.current_fragment(), None);
}

#[test]
fn test_numbers_are_fragments_too() {
    // Gating numbers out is the query adapter's job
    let session = FormulaSession::with_text("1 + 42");
    assert_eq!(session.current_fragment().unwrap().text, "42");
}

#[test]
fn test_apply_suggestion_replaces_fragment() {
    let mut session = FormulaSession::with_text("2 * rev");
    session.apply_suggestion(&suggestion("revenue", 10.0));
    assert_eq!(session.text(), "2 * {{revenue}}");
    assert_eq!(session.cursor(), session.text().len());
}

#[test]
fn test_apply_suggestion_mid_text() {
    let mut session = FormulaSession::with_text("co + 1");
    session.set_cursor(2);
    session.apply_suggestion(&suggestion("cost", 1.0));
    assert_eq!(session.text(), "{{cost}} + 1");
    assert_eq!(session.cursor(), 8);
}

#[test]
fn test_apply_suggestion_without_fragment_inserts() {
    let mut session = FormulaSession::with_text("2 * ");
    session.apply_suggestion(&suggestion("rate", 1.0));
    assert_eq!(session.text(), "2 * {{rate}}");
}

#[test]
fn test_apply_suggestion_with_closing_delimiter_in_name_is_refused() {
    let mut session = FormulaSession::with_text("2*");
    assert!(!session.apply_suggestion(&suggestion("a}}b", 1.0)));
    assert_eq!(session.text(), "2*");
    assert_eq!(session.cursor(), 2);

    assert!(session.apply_suggestion(&suggestion("ab", 1.0)));
    assert_eq!(session.tokens().len(), 3);
    assert_eq!(session.tokens()[2].name.as_deref(), Some("ab"));
}

// ============================================================================
// Commit
// ============================================================================

#[test]
fn test_compose_and_evaluate() {
    let revenue = suggestion("revenue", 1200.0);
    let cost = suggestion("cost", 800.0);
    let variables = VariableTable::from_suggestions([&revenue, &cost]);

    let mut session = FormulaSession::new();
    session.insert("(rev");
    session.apply_suggestion(&revenue);
    session.insert(" - co");
    session.apply_suggestion(&cost);
    session.insert(") / 2");

    assert_eq!(session.text(), "({{revenue}} - {{cost}}) / 2");
    assert_eq!(session.evaluate(&variables), Ok(200.0));

    // Backspace over ") / 2" then the cost tag
    for _ in 0..5 {
        session.backspace();
    }
    assert_eq!(session.backspace(), Deletion::Tag(Span::new(15, 23)));
    assert_eq!(session.text(), "({{revenue}} - ");
    assert!(session.evaluate(&variables).is_err());
}
