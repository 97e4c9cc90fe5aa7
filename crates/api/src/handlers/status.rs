//! Polling status check for tracked jobs.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use dispatchd_core::envelope::Envelope;
use dispatchd_core::types::Token;

use crate::error::AppResult;
use crate::response::PendingResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub id: Token,
}

/// GET /api/v1/status?id=<token>
///
/// While the job is pending this is idempotent and may be polled any
/// number of times. The first check after completion consumes the record
/// and answers with its envelope; any later check finds nothing and gets
/// a 404, so a result is delivered to exactly one poller.
pub async fn job_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Response> {
    if !state.tracker.is_complete(&query.id)? {
        return Ok(Json(PendingResponse::new(query.id)).into_response());
    }

    let record = state.tracker.pop(&query.id)?;
    let envelope = match record.error {
        Some(message) => Envelope::failure(message),
        None => Envelope::success(record.result.unwrap_or(Value::Null)),
    };

    tracing::debug!(token = %query.id, failed = envelope.is_error(), "Job result delivered");
    Ok(Json(envelope).into_response())
}
