//! Command dispatcher: one engine behind every calling convention.
//!
//! The CLI adapter, the synchronous HTTP adapter, and the async/polling
//! HTTP adapter are all thin wrappers over [`Dispatcher::execute`] /
//! [`Dispatcher::dispatch`]; normalization lives here and nowhere else.

use std::sync::Arc;

use serde_json::Value;

use crate::editor::{EditorContext, OpenWindowFn};
use crate::envelope::{wrap_string_result, Envelope};
use crate::error::CoreError;
use crate::operation::OperationContext;
use crate::policy::{effective_operation, CallerMode};
use crate::project::Project;
use crate::registry::OperationRegistry;

/// A single dispatch request, independent of how it arrived.
pub struct DispatchRequest {
    pub name: String,
    pub body: Value,
    pub project: Option<Project>,
    pub editor: Option<String>,
    pub open_window: Option<OpenWindowFn>,
}

impl DispatchRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Value::Null,
            project: None,
            editor: None,
            open_window: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    pub fn with_open_window(mut self, open_window: OpenWindowFn) -> Self {
        self.open_window = Some(open_window);
        self
    }
}

/// Resolves an operation name to an executable unit, runs it, and
/// normalizes the outcome.
///
/// Concurrent dispatches run independently; nothing here serializes
/// unrelated requests.
pub struct Dispatcher {
    registry: Arc<OperationRegistry>,
    mode: CallerMode,
}

impl Dispatcher {
    pub fn new(registry: Arc<OperationRegistry>, mode: CallerMode) -> Self {
        Self { registry, mode }
    }

    pub fn mode(&self) -> CallerMode {
        self.mode
    }

    /// Run a request and fold the outcome into the uniform envelope.
    ///
    /// Never fails: a bad editor, an unknown name, and a unit that raises
    /// all surface as the envelope's error arm, in one shape.
    pub async fn execute(&self, request: DispatchRequest) -> Envelope {
        let name = request.name.clone();
        match self.dispatch(request).await {
            Ok(result) => Envelope::success(result),
            Err(err) => {
                tracing::warn!(operation = %name, error = %err, detail = ?err, "Command failed");
                Envelope::failure(err.to_string())
            }
        }
    }

    /// Run a request, returning the raw outcome.
    ///
    /// Plain-string results come back already wrapped as
    /// `{ "message": ... }`. Callers that need the full error (the async
    /// path, which records the diagnostic chain in the job ledger) use
    /// this instead of [`execute`](Self::execute).
    pub async fn dispatch(&self, request: DispatchRequest) -> Result<Value, CoreError> {
        let DispatchRequest {
            name,
            body,
            project,
            editor,
            open_window,
        } = request;

        let editor = editor
            .map(|editor_name| EditorContext::new(&editor_name, open_window))
            .transpose()?;

        let effective = effective_operation(&name, self.mode, project.as_ref());
        if effective != name {
            tracing::info!(
                requested = %name,
                substituted = %effective,
                "Stale project credentials, redirecting to re-authentication"
            );
        }

        let unit = self
            .registry
            .instantiate(
                effective,
                OperationContext {
                    project,
                    body,
                    editor,
                },
            )
            .map_err(|err| match err {
                // Callers asked for `name`; report the lookup failure in
                // their terms even when the policy substituted it.
                CoreError::UnknownOperation(_) => CoreError::UnknownOperation(name.clone()),
                other => other,
            })?;

        tracing::debug!(operation = %effective, "Dispatching command");
        let result = unit.execute().await?;
        Ok(wrap_string_result(result))
    }
}
