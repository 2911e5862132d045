use super::super::dto::HistoryResponse;
use super::super::state::ServerState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    get,
    path = "/history/{session}",
    tag = "history",
    params(("session" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "History entries for the session", body = HistoryResponse)
    )
)]
pub async fn history_handler(
    State(state): State<Arc<ServerState>>,
    Path(session): Path<String>,
) -> Json<HistoryResponse> {
    let entries = state.screener().history(&session).await;
    info!(
        session_id = session.as_str(),
        entries = entries.len(),
        "Served history"
    );
    Json(HistoryResponse {
        session_id: session,
        entries,
    })
}

#[utoipa::path(
    get,
    path = "/history/{session}/export",
    tag = "history",
    params(("session" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Plain-text listing, one title per line", content_type = "text/plain")
    )
)]
pub async fn export_handler(
    State(state): State<Arc<ServerState>>,
    Path(session): Path<String>,
) -> impl IntoResponse {
    let listing = state.screener().export(&session).await;
    info!(session_id = session.as_str(), "Served history export");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        listing,
    )
}

#[utoipa::path(
    post,
    path = "/reset/{session}",
    tag = "history",
    params(("session" = String, Path, description = "Session identifier")),
    responses((status = 204, description = "Session cleared"))
)]
pub async fn reset_handler(
    State(state): State<Arc<ServerState>>,
    Path(session): Path<String>,
) -> StatusCode {
    state.screener().reset(&session).await;
    StatusCode::NO_CONTENT
}
