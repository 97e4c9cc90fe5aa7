//! Handlers for the `/generic` dispatch resource.
//!
//! One engine, two calling conventions: the synchronous handlers await
//! the dispatcher and answer with the envelope; the asynchronous handlers
//! enqueue a token, start the dispatch in the background, and answer
//! immediately with `{ "status": "pending", "id": ... }`.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use dispatchd_core::dispatcher::{DispatchRequest, Dispatcher};
use dispatchd_core::project::Project;
use dispatchd_core::tracker::{JobError, JobTracker};
use dispatchd_core::types::Token;
use dispatchd_events::{EventBus, JobEvent};

use crate::error::{AppError, AppResult};
use crate::response::PendingResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

/// JSON body accepted by the POST dispatch endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct DispatchBody {
    /// Name of the operation to run.
    #[validate(length(min = 1, message = "operation name must not be empty"))]
    pub name: String,
    /// Operation payload, passed through verbatim.
    #[serde(default)]
    pub body: Value,
    /// Target project, if the operation needs one.
    #[serde(default)]
    pub project: Option<Project>,
    /// Name of the editor that initiated the request.
    #[serde(default)]
    pub editor: Option<String>,
}

impl DispatchBody {
    fn into_request(self) -> DispatchRequest {
        let mut request = DispatchRequest::new(self.name).with_body(self.body);
        if let Some(project) = self.project {
            request = request.with_project(project);
        }
        if let Some(editor) = self.editor {
            request = request.with_editor(editor);
        }
        request
    }
}

/// Query parameters accepted by the GET dispatch endpoints.
///
/// `body` is a JSON-encoded string mirroring the POST body's `body` field.
#[derive(Debug, Deserialize)]
pub struct DispatchParams {
    pub name: String,
    pub body: Option<String>,
    pub editor: Option<String>,
}

impl DispatchParams {
    fn into_body(self) -> AppResult<DispatchBody> {
        let body = match self.body.as_deref() {
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| AppError::BadRequest(format!("body is not valid JSON: {e}")))?,
            None => Value::Null,
        };
        Ok(DispatchBody {
            name: self.name,
            body,
            project: None,
            editor: self.editor,
        })
    }
}

fn validated(input: DispatchBody) -> AppResult<DispatchBody> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(input)
}

// ---------------------------------------------------------------------------
// Synchronous dispatch
// ---------------------------------------------------------------------------

/// POST /api/v1/generic
///
/// Run the operation and answer with the envelope once it finishes. Both
/// outcomes are a 200; the envelope's `result`/`error` arm carries the
/// distinction.
pub async fn dispatch_sync(
    State(state): State<AppState>,
    Json(input): Json<DispatchBody>,
) -> AppResult<impl IntoResponse> {
    let input = validated(input)?;
    let envelope = state.dispatcher.execute(input.into_request()).await;
    Ok(Json(envelope))
}

/// GET /api/v1/generic
///
/// Query-parameter variant of [`dispatch_sync`].
pub async fn dispatch_sync_query(
    State(state): State<AppState>,
    Query(params): Query<DispatchParams>,
) -> AppResult<impl IntoResponse> {
    let input = validated(params.into_body()?)?;
    let envelope = state.dispatcher.execute(input.into_request()).await;
    Ok(Json(envelope))
}

// ---------------------------------------------------------------------------
// Asynchronous dispatch
// ---------------------------------------------------------------------------

/// POST /api/v1/generic/async
///
/// Enqueue a token, start the dispatch in the background, and answer 202
/// immediately. The caller exchanges the token at `/status`.
pub async fn dispatch_async(
    State(state): State<AppState>,
    Json(input): Json<DispatchBody>,
) -> AppResult<impl IntoResponse> {
    let input = validated(input)?;
    let token = state.tracker.enqueue(Some(input.name.clone()));

    tracing::info!(token = %token, operation = %input.name, "Job submitted");
    spawn_tracked(&state, token, input.into_request());

    Ok((StatusCode::ACCEPTED, Json(PendingResponse::new(token))))
}

/// GET /api/v1/generic/async
///
/// Query-parameter variant of [`dispatch_async`].
pub async fn dispatch_async_query(
    State(state): State<AppState>,
    Query(params): Query<DispatchParams>,
) -> AppResult<impl IntoResponse> {
    let input = validated(params.into_body()?)?;
    let token = state.tracker.enqueue(Some(input.name.clone()));

    tracing::info!(token = %token, operation = %input.name, "Job submitted");
    spawn_tracked(&state, token, input.into_request());

    Ok((StatusCode::ACCEPTED, Json(PendingResponse::new(token))))
}

/// Run a dispatched job in the background, record its outcome in the
/// ledger, and announce completion on the event bus.
fn spawn_tracked(state: &AppState, token: Token, request: DispatchRequest) {
    let dispatcher: Arc<Dispatcher> = Arc::clone(&state.dispatcher);
    let tracker: Arc<JobTracker> = Arc::clone(&state.tracker);
    let bus: Arc<EventBus> = Arc::clone(&state.event_bus);
    let operation = request.name.clone();

    tokio::spawn(async move {
        let recorded = match dispatcher.dispatch(request).await {
            Ok(result) => tracker.complete(&token, None, Some(result)),
            Err(err) => {
                tracing::error!(token = %token, error = %err, detail = ?err, "Job failed");
                tracker.complete(&token, Some(JobError::from(&err)), None)
            }
        };

        match recorded {
            Ok(()) => bus.publish(JobEvent::job_completed(token).with_operation(operation)),
            Err(err) => {
                tracing::error!(token = %token, error = %err, "Failed to record job completion")
            }
        }
    });
}
