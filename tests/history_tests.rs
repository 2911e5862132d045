// History tests - session-scoped ordering, dedup by title, export listing

use covercheck::domain::history::SessionHistory;
use covercheck::domain::report::{BookReport, Ratings, Verdict};

fn report(title: &str, verdict: Verdict) -> BookReport {
    BookReport {
        title: title.to_string(),
        author: "Someone".to_string(),
        verdict,
        one_line_verdict: "Fine".to_string(),
        ratings: Ratings::default(),
        summary: String::new(),
        themes: String::new(),
        series: None,
        cover_url: None,
    }
}

#[test]
fn appends_in_order() {
    let mut history = SessionHistory::new();
    assert!(history.push(report("Foo", Verdict::Green)));
    assert!(history.push(report("Bar", Verdict::Red)));
    let titles: Vec<_> = history
        .entries()
        .iter()
        .map(|entry| entry.report.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Foo", "Bar"]);
}

#[test]
fn duplicate_title_leaves_length_unchanged() {
    let mut history = SessionHistory::new();
    assert!(history.push(report("Foo", Verdict::Green)));
    assert!(!history.push(report("Foo", Verdict::Red)));
    assert_eq!(history.len(), 1);
    // The original entry survives, not the later duplicate
    assert_eq!(history.entries()[0].report.verdict, Verdict::Green);
}

#[test]
fn dedup_ignores_title_case() {
    let mut history = SessionHistory::new();
    assert!(history.push(report("The Hobbit", Verdict::Green)));
    assert!(!history.push(report("the hobbit", Verdict::Green)));
    assert_eq!(history.len(), 1);
}

#[test]
fn export_lists_title_and_verdict_per_line() {
    let mut history = SessionHistory::new();
    history.push(report("Foo", Verdict::Green));
    history.push(report("Bar", Verdict::Caution));
    assert_eq!(history.export_listing(), "Foo - Green\nBar - Caution\n");
}

#[test]
fn export_of_empty_history_is_empty() {
    assert_eq!(SessionHistory::new().export_listing(), "");
}

#[test]
fn clear_empties_the_history() {
    let mut history = SessionHistory::new();
    history.push(report("Foo", Verdict::Green));
    history.clear();
    assert!(history.is_empty());
    // A cleared title may be recorded again
    assert!(history.push(report("Foo", Verdict::Green)));
}
