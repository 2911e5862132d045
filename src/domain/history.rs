//! Session-scoped analysis history
//!
//! Ordered, in-memory, unique by title. Nothing here survives the process;
//! there is deliberately no storage layer behind it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::report::BookReport;

/// One analyzed book in a session's history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub report: BookReport,
    pub analyzed_at: DateTime<Utc>,
}

/// Ordered sequence of analyzed books, unique by title (case-insensitive)
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a report unless an entry with the same title already exists.
    ///
    /// Returns `true` when the report was appended, `false` when it was a
    /// duplicate and the history was left unchanged.
    pub fn push(&mut self, report: BookReport) -> bool {
        if self.contains_title(&report.title) {
            return false;
        }
        self.entries.push(HistoryEntry {
            report,
            analyzed_at: Utc::now(),
        });
        true
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.report.title.eq_ignore_ascii_case(title))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render the history as a flat text listing, one `title - verdict` line
    /// per entry, for user-triggered export.
    pub fn export_listing(&self) -> String {
        let mut listing = String::new();
        for entry in &self.entries {
            listing.push_str(&entry.report.title);
            listing.push_str(" - ");
            listing.push_str(entry.report.verdict.as_str());
            listing.push('\n');
        }
        listing
    }
}
