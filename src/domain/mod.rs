pub mod history;
pub mod report;

pub use history::{HistoryEntry, SessionHistory};
pub use report::{BookReport, Ratings, SeriesInfo, Verdict};
