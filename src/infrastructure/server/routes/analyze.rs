use super::super::dto::{ErrorResponse, RestAnalyzeRequest, RestAnalyzeResponse};
use super::super::state::ServerState;
use super::error_reply;
use crate::application::screener::AnalyzeRequest;
use crate::infrastructure::model::ImagePayload;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analyze",
    request_body = RestAnalyzeRequest,
    responses(
        (status = 200, description = "Cover analyzed", body = RestAnalyzeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "Content withheld by safety filtering", body = ErrorResponse),
        (status = 502, description = "Model unreachable or reply unreadable", body = ErrorResponse)
    )
)]
pub async fn analyze_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<RestAnalyzeRequest>,
) -> Result<Json<RestAnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let RestAnalyzeRequest {
        image,
        mime_type,
        target_age,
        session_id,
    } = payload;

    info!(
        session = session_id.as_deref(),
        target_age,
        mime_type = mime_type.as_str(),
        "Received /analyze request"
    );

    if image.trim().is_empty() {
        error!("Rejecting /analyze request due to empty image payload");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "image cannot be empty".to_string(),
            }),
        ));
    }

    let screener = state.screener();
    let result = screener
        .analyze(AnalyzeRequest {
            image: ImagePayload {
                mime_type,
                data: image,
            },
            target_age,
            session_id,
        })
        .await;

    match result {
        Ok(outcome) => {
            info!(
                session_id = outcome.session_id.as_str(),
                title = outcome.report.title.as_str(),
                "Analyze request completed successfully"
            );
            Ok(Json(RestAnalyzeResponse {
                session_id: outcome.session_id,
                newly_recorded: outcome.newly_recorded,
                report: outcome.report,
            }))
        }
        Err(err) => {
            error!(%err, "Analyze request failed");
            Err(error_reply(&err))
        }
    }
}
