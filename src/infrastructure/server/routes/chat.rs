use super::super::dto::{ErrorResponse, RestChatRequest, RestChatResponse};
use super::super::state::ServerState;
use super::error_reply;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = RestChatRequest,
    responses(
        (status = 200, description = "Question answered", body = RestChatResponse),
        (status = 400, description = "Invalid request or no analysis yet", body = ErrorResponse),
        (status = 422, description = "Content withheld by safety filtering", body = ErrorResponse),
        (status = 502, description = "Model unreachable", body = ErrorResponse)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<RestChatRequest>,
) -> Result<Json<RestChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let RestChatRequest {
        question,
        session_id,
    } = payload;

    info!(session_id = session_id.as_str(), "Received /chat request");

    if question.trim().is_empty() {
        error!("Rejecting /chat request due to empty question");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "question cannot be empty".to_string(),
            }),
        ));
    }

    let screener = state.screener();
    match screener.ask(&question, &session_id).await {
        Ok(answer) => {
            info!(
                session_id = answer.session_id.as_str(),
                "Chat request completed successfully"
            );
            Ok(Json(RestChatResponse {
                session_id: answer.session_id,
                answer: answer.answer,
            }))
        }
        Err(err) => {
            error!(%err, "Chat request failed");
            Err(error_reply(&err))
        }
    }
}
