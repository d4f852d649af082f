//! The channel endpoint: one named method call per request.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::channel::{error_codes, MethodCall, MethodReply};
use crate::server::error::ApiError;
use crate::server::ServerState;

/// POST /channel
///
/// Dispatches one bridge method call and returns the `{ ok, data }` /
/// `{ ok, error }` envelope. An unknown method name maps to 501; operation
/// failures never reach this layer (the handler masks them as empty success).
pub(crate) async fn invoke_method(
    State(state): State<Arc<ServerState>>,
    Json(call): Json<MethodCall>,
) -> Result<Json<MethodReply>, ApiError> {
    // The query operations block on the platform for the duration of the
    // call; keep them off the runtime workers.
    let reply = tokio::task::spawn_blocking(move || state.handler.handle(&call))
        .await
        .map_err(|error| ApiError::internal(format!("bridge dispatch task failed: {error}")))?;

    match &reply.error {
        None => Ok(Json(reply)),
        Some(error) => {
            let status = match error.code.as_str() {
                error_codes::NOT_IMPLEMENTED => axum::http::StatusCode::NOT_IMPLEMENTED,
                error_codes::INVALID_INPUT => axum::http::StatusCode::BAD_REQUEST,
                _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err(ApiError::new(status, &error.code, &error.message))
        }
    }
}
