//! Report types
//!
//! The structured verdict produced for one analyzed cover. A report is only
//! ever constructed complete: the normalizer either fills every field or
//! fails, so no partial report exists anywhere in the system.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Categorical age-appropriateness judgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Green,
    Caution,
    Red,
}

impl Verdict {
    /// Parse a model-produced label leniently.
    ///
    /// The model is asked for "Green", "Caution" or "Red" but replies with
    /// free text; common synonyms are accepted. An unrecognized label falls
    /// back to `Caution` rather than failing the whole report.
    ///
    /// Red cues win over Green cues, and "ok"/"fine" only count as
    /// standalone words: "book", "spooky" and "not ok" must never read as
    /// approval.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if has_word(&lower, "red")
            || has_word(&lower, "avoid")
            || lower.contains("not suit")
            || lower.contains("unsuitable")
            || lower.contains("not ok")
            || lower.contains("not fine")
        {
            Verdict::Red
        } else if has_word(&lower, "green") || has_word(&lower, "ok") || has_word(&lower, "fine") {
            Verdict::Green
        } else {
            Verdict::Caution
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Green => "Green",
            Verdict::Caution => "Caution",
            Verdict::Red => "Red",
        }
    }
}

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

/// Content intensity ratings on a 0-5 scale, defaulting to 0 when the model
/// omits them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ratings {
    pub violence: u8,
    pub scary_content: u8,
    pub language: u8,
    pub romance: u8,
}

/// Series membership, when the model recognizes one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeriesInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<u32>,
}

/// Complete analysis result for one book cover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookReport {
    pub title: String,
    pub author: String,
    pub verdict: Verdict,
    pub one_line_verdict: String,
    #[serde(default)]
    pub ratings: Ratings,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub themes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<SeriesInfo>,
    /// Cover image URL resolved by the metadata lookup, when one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_label_synonyms() {
        assert_eq!(Verdict::from_label("Green"), Verdict::Green);
        assert_eq!(Verdict::from_label("  green light "), Verdict::Green);
        assert_eq!(Verdict::from_label("OK for this age"), Verdict::Green);
        assert_eq!(Verdict::from_label("RED"), Verdict::Red);
        assert_eq!(Verdict::from_label("avoid"), Verdict::Red);
        assert_eq!(Verdict::from_label("Caution"), Verdict::Caution);
        assert_eq!(Verdict::from_label("Yellow"), Verdict::Caution);
    }

    #[test]
    fn unknown_label_degrades_to_caution() {
        assert_eq!(Verdict::from_label("banana"), Verdict::Caution);
        assert_eq!(Verdict::from_label(""), Verdict::Caution);
    }

    #[test]
    fn negated_approval_is_not_green() {
        assert_eq!(Verdict::from_label("Not OK for young readers"), Verdict::Red);
        assert_eq!(Verdict::from_label("not fine at this age"), Verdict::Red);
        assert_eq!(Verdict::from_label("Too spooky, not suitable"), Verdict::Red);
    }

    #[test]
    fn incidental_ok_inside_words_is_not_green() {
        // "book" and "spooky" contain "ok"; neither is an approval
        assert_eq!(Verdict::from_label("A creepy book"), Verdict::Caution);
        assert_eq!(Verdict::from_label("Quite spooky"), Verdict::Caution);
    }

    #[test]
    fn red_cues_win_over_green_cues() {
        assert_eq!(Verdict::from_label("looks fine but avoid"), Verdict::Red);
    }
}
