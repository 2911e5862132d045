//! Reply normalization
//!
//! The single boundary where the model's untrusted free text enters the
//! system. The reply is stripped of code-fence wrapping, decoded as JSON and
//! checked against the report schema. Required fields are never defaulted;
//! optional fields always are. The result is all-or-nothing: a complete
//! `BookReport` or a `ParseError`, never a partial record.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::MAX_RATING;
use crate::domain::report::{BookReport, Ratings, SeriesInfo, Verdict};
use crate::infrastructure::model::ModelReply;

/// Why a model reply could not be turned into a report
#[derive(Debug, Error)]
pub enum ParseError {
    /// The service withheld the reply (safety filtering). Distinct from
    /// `Malformed` because the remedy differs: a different image may pass,
    /// re-reading the same reply never will.
    #[error("reply was withheld by the service: {reason}")]
    Blocked { reason: String },

    #[error("reply was not decodable: {reason}")]
    Malformed { reason: String },

    #[error("reply is missing required field '{field}'")]
    MissingRequired { field: &'static str },
}

impl ParseError {
    /// User-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ParseError::Blocked { .. } => {
                "The service declined to analyze this image. Try a different photo.".to_string()
            }
            ParseError::Malformed { .. } | ParseError::MissingRequired { .. } => {
                "The model reply could not be read. Please submit the image again.".to_string()
            }
        }
    }
}

/// Normalize a raw model reply into a complete report.
pub fn normalize(reply: &ModelReply) -> Result<BookReport, ParseError> {
    if let Some(reason) = &reply.block_reason {
        return Err(ParseError::Blocked {
            reason: reason.clone(),
        });
    }

    let payload = strip_fences(&reply.text);
    let value: Value = serde_json::from_str(payload).map_err(|err| ParseError::Malformed {
        reason: err.to_string(),
    })?;
    let Value::Object(map) = value else {
        return Err(ParseError::Malformed {
            reason: "expected a JSON object".to_string(),
        });
    };

    let title = required_str(&map, "title")?;
    let author = required_str(&map, "author")?;
    let verdict_label = required_str(&map, "verdict")?;
    let one_line_verdict = required_str(&map, "one_line_verdict")?;

    Ok(BookReport {
        title,
        author,
        verdict: Verdict::from_label(&verdict_label),
        one_line_verdict,
        ratings: ratings_from(map.get("ratings")),
        summary: optional_str(&map, "summary"),
        themes: optional_str(&map, "themes"),
        series: series_from(map.get("series")),
        cover_url: None,
    })
}

/// Remove code-fence wrapping around the payload. Idempotent: text without
/// fences passes through untouched.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if text.starts_with("```") {
        text = text.trim_start_matches('`');
        for tag in ["json", "JSON"] {
            if let Some(rest) = text.strip_prefix(tag) {
                text = rest;
                break;
            }
        }
        if let Some(end) = text.rfind("```") {
            text = &text[..end];
        }
        text = text.trim_matches('`');
    }
    text.trim()
}

fn required_str(map: &Map<String, Value>, field: &'static str) -> Result<String, ParseError> {
    map.get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ParseError::MissingRequired { field })
}

fn optional_str(map: &Map<String, Value>, field: &str) -> String {
    map.get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn ratings_from(value: Option<&Value>) -> Ratings {
    let Some(Value::Object(map)) = value else {
        return Ratings::default();
    };
    Ratings {
        violence: coerce_rating(map.get("violence")),
        scary_content: coerce_rating(map.get("scary_content")),
        language: coerce_rating(map.get("language")),
        romance: coerce_rating(map.get("romance")),
    }
}

/// Coerce a model-produced rating into the 0-5 scale.
///
/// The model's numeric output is not trustworthy: out-of-range numbers are
/// clamped, numeric strings are parsed, everything else defaults to 0. A bad
/// rating never fails the record.
fn coerce_rating(value: Option<&Value>) -> u8 {
    let max = i64::from(MAX_RATING);
    let number = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    number.map_or(0, |n| n.clamp(0, max) as u8)
}

fn series_from(value: Option<&Value>) -> Option<SeriesInfo> {
    match value {
        Some(Value::String(name)) if !name.trim().is_empty() => Some(SeriesInfo {
            name: name.trim().to_string(),
            entry: None,
        }),
        Some(Value::Object(map)) => {
            let name = map.get("name").and_then(Value::as_str)?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            let entry = map
                .get("entry")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok());
            Some(SeriesInfo { name, entry })
        }
        _ => None,
    }
}
