pub(super) mod analyze;
pub(super) mod chat;
pub(super) mod history;

use super::dto::ErrorResponse;
use crate::application::normalizer::ParseError;
use crate::application::screener::ScreenError;
use axum::Json;
use axum::http::StatusCode;

/// Map a screening failure to the HTTP surface.
///
/// Blocked content is the client's problem to work around (different image),
/// model and parse failures are upstream faults, everything else is a bad
/// request.
pub(super) fn error_reply(err: &ScreenError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        ScreenError::Parse(ParseError::Blocked { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        ScreenError::Parse(_) | ScreenError::Model(_) => StatusCode::BAD_GATEWAY,
        ScreenError::InvalidTargetAge { .. } | ScreenError::NoAnalysisYet => {
            StatusCode::BAD_REQUEST
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
        }),
    )
}
