// Normalizer tests - the single boundary where model free text enters
//
// Covers fence stripping, required-field enforcement, optional-field
// defaulting, rating coercion and the blocked/malformed distinction.

use covercheck::domain::report::Verdict;
use covercheck::infrastructure::model::ModelReply;
use covercheck::normalizer::{ParseError, normalize, strip_fences};

const FULL_PAYLOAD: &str = r#"{
    "title": "The Graveyard Book",
    "author": "Neil Gaiman",
    "verdict": "Caution",
    "one_line_verdict": "Dark but age-appropriate for confident readers",
    "ratings": {"violence": 3, "scary_content": 4, "language": 1, "romance": 0},
    "summary": "A boy raised by ghosts.",
    "themes": "death, belonging",
    "series": {"name": "Standalone", "entry": 1}
}"#;

#[test]
fn strips_json_fences() {
    let fenced = "```json\n{\"a\":1}\n```";
    assert_eq!(strip_fences(fenced), "{\"a\":1}");
}

#[test]
fn fence_stripping_is_idempotent() {
    let fenced = "```json\n{\"a\":1}\n```";
    let once = strip_fences(fenced);
    assert_eq!(strip_fences(once), once);
}

#[test]
fn bare_text_passes_through_untouched() {
    assert_eq!(strip_fences("  {\"a\":1}  "), "{\"a\":1}");
}

#[test]
fn fenced_reply_equals_unfenced_reply() {
    let unfenced = normalize(&ModelReply::text(FULL_PAYLOAD)).expect("unfenced");
    let fenced = normalize(&ModelReply::text(format!("```json\n{FULL_PAYLOAD}\n```")))
        .expect("fenced");
    assert_eq!(unfenced, fenced);
}

#[test]
fn round_trips_a_complete_payload() {
    let report = normalize(&ModelReply::text(FULL_PAYLOAD)).expect("report");
    assert_eq!(report.title, "The Graveyard Book");
    assert_eq!(report.author, "Neil Gaiman");
    assert_eq!(report.verdict, Verdict::Caution);
    assert_eq!(
        report.one_line_verdict,
        "Dark but age-appropriate for confident readers"
    );
    assert_eq!(report.ratings.violence, 3);
    assert_eq!(report.ratings.scary_content, 4);
    assert_eq!(report.ratings.language, 1);
    assert_eq!(report.ratings.romance, 0);
    assert_eq!(report.summary, "A boy raised by ghosts.");
    assert_eq!(report.themes, "death, belonging");
    let series = report.series.expect("series");
    assert_eq!(series.name, "Standalone");
    assert_eq!(series.entry, Some(1));
}

#[test]
fn minimal_fenced_reply_defaults_optional_fields() {
    let raw = "```json\n{\"title\":\"Foo\",\"author\":\"Bar\",\"verdict\":\"Green\",\"one_line_verdict\":\"Fine\"}\n```";
    let report = normalize(&ModelReply::text(raw)).expect("report");
    assert_eq!(report.title, "Foo");
    assert_eq!(report.author, "Bar");
    assert_eq!(report.verdict, Verdict::Green);
    assert_eq!(report.one_line_verdict, "Fine");
    assert_eq!(report.ratings.violence, 0);
    assert_eq!(report.ratings.scary_content, 0);
    assert_eq!(report.ratings.language, 0);
    assert_eq!(report.ratings.romance, 0);
    assert_eq!(report.summary, "");
    assert_eq!(report.themes, "");
    assert!(report.series.is_none());
    assert!(report.cover_url.is_none());
}

#[test]
fn missing_required_field_names_the_field() {
    let raw = r#"{"title":"Foo","verdict":"Green","one_line_verdict":"Fine"}"#;
    let err = normalize(&ModelReply::text(raw)).expect_err("must fail");
    match err {
        ParseError::MissingRequired { field } => assert_eq!(field, "author"),
        other => panic!("expected MissingRequired, got {other:?}"),
    }
}

#[test]
fn empty_required_field_counts_as_missing() {
    let raw = r#"{"title":"  ","author":"Bar","verdict":"Green","one_line_verdict":"Fine"}"#;
    let err = normalize(&ModelReply::text(raw)).expect_err("must fail");
    assert!(matches!(err, ParseError::MissingRequired { field: "title" }));
}

#[test]
fn undecodable_reply_is_malformed() {
    let err = normalize(&ModelReply::text("the cover shows a dragon")).expect_err("must fail");
    assert!(matches!(err, ParseError::Malformed { .. }));
}

#[test]
fn non_object_json_is_malformed() {
    let err = normalize(&ModelReply::text("[1,2,3]")).expect_err("must fail");
    assert!(matches!(err, ParseError::Malformed { .. }));
}

#[test]
fn blocked_reply_is_distinguished_from_malformed() {
    // Empty text plus a signaled safety block must not be read as Malformed
    let err = normalize(&ModelReply::blocked("SAFETY")).expect_err("must fail");
    match err {
        ParseError::Blocked { reason } => assert_eq!(reason, "SAFETY"),
        other => panic!("expected Blocked, got {other:?}"),
    }
}

#[test]
fn out_of_range_ratings_are_clamped() {
    let raw = r#"{
        "title":"Foo","author":"Bar","verdict":"Green","one_line_verdict":"Fine",
        "ratings":{"violence":7,"scary_content":-1,"language":"high","romance":"4"}
    }"#;
    let report = normalize(&ModelReply::text(raw)).expect("report");
    assert_eq!(report.ratings.violence, 5);
    assert_eq!(report.ratings.scary_content, 0);
    assert_eq!(report.ratings.language, 0);
    assert_eq!(report.ratings.romance, 4);
}

#[test]
fn series_as_plain_string_is_accepted() {
    let raw = r#"{
        "title":"Foo","author":"Bar","verdict":"Green","one_line_verdict":"Fine",
        "series":"The Foo Chronicles"
    }"#;
    let report = normalize(&ModelReply::text(raw)).expect("report");
    let series = report.series.expect("series");
    assert_eq!(series.name, "The Foo Chronicles");
    assert_eq!(series.entry, None);
}

#[test]
fn negated_verdict_label_is_not_classified_green() {
    let raw = r#"{"title":"Foo","author":"Bar","verdict":"Not OK for young readers","one_line_verdict":"No"}"#;
    let report = normalize(&ModelReply::text(raw)).expect("report");
    assert_eq!(report.verdict, Verdict::Red);
}

#[test]
fn free_form_verdict_labels_are_classified() {
    let raw = r#"{"title":"Foo","author":"Bar","verdict":"red flag, avoid","one_line_verdict":"No"}"#;
    let report = normalize(&ModelReply::text(raw)).expect("report");
    assert_eq!(report.verdict, Verdict::Red);
}
