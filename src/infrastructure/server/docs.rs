use utoipa::OpenApi;

use super::dto::{
    ErrorResponse, HistoryResponse, RestAnalyzeRequest, RestAnalyzeResponse, RestChatRequest,
    RestChatResponse,
};
use crate::domain::history::HistoryEntry;
use crate::domain::report::{BookReport, Ratings, SeriesInfo, Verdict};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "covercheck REST API",
        description = "Book-cover age-appropriateness screening"
    ),
    paths(
        super::routes::analyze::analyze_handler,
        super::routes::chat::chat_handler,
        super::routes::history::history_handler,
        super::routes::history::export_handler,
        super::routes::history::reset_handler,
    ),
    components(schemas(
        RestAnalyzeRequest,
        RestAnalyzeResponse,
        RestChatRequest,
        RestChatResponse,
        HistoryResponse,
        ErrorResponse,
        BookReport,
        HistoryEntry,
        Ratings,
        SeriesInfo,
        Verdict,
    ))
)]
pub struct ApiDoc;
