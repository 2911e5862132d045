use crate::domain::history::HistoryEntry;
use crate::domain::report::BookReport;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestAnalyzeRequest {
    /// Base64-encoded cover image
    pub image: String,
    /// MIME type of the image (e.g., "image/jpeg")
    pub mime_type: String,
    /// Target reader age, 5-18; defaults to the configured value
    pub target_age: Option<u8>,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestAnalyzeResponse {
    pub session_id: String,
    /// False when the title was already present in the session history
    pub newly_recorded: bool,
    pub report: BookReport,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestChatRequest {
    pub question: String,
    pub session_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestChatResponse {
    pub session_id: String,
    pub answer: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub session_id: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
