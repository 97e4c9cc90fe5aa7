use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use dispatchd_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses
/// whose body carries the same `{ "error": { "message" } }` shape as the
/// dispatch envelope, plus a stable machine-readable `code`.
///
/// Note that dispatch failures themselves never reach this type: the
/// dispatcher folds them into a 200 envelope. `AppError` covers what the
/// transport layer owns: ledger lookups, malformed requests.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `dispatchd_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::UnknownToken(_) => {
                    (StatusCode::NOT_FOUND, "UNKNOWN_TOKEN", core.to_string())
                }
                CoreError::UnknownOperation(_) => {
                    (StatusCode::NOT_FOUND, "UNKNOWN_OPERATION", core.to_string())
                }
                CoreError::UnsupportedEditor(_) => (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_EDITOR",
                    core.to_string(),
                ),
                CoreError::DuplicateOperation(_) => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_OPERATION",
                    core.to_string(),
                ),
                CoreError::Execution(err) => {
                    tracing::error!(error = %err, "Operation execution error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "EXECUTION_ERROR",
                        core.to_string(),
                    )
                }
                CoreError::InvariantViolation(msg) => {
                    tracing::error!(error = %msg, "Invariant violation");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INVARIANT_VIOLATION",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": { "message": message },
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
