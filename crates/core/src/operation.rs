//! The contract every executable operation implements.

use async_trait::async_trait;
use serde_json::Value;

use crate::editor::EditorContext;
use crate::project::Project;

/// Everything an operation sees: the target project, the raw request
/// body, and the editor context of the initiating client.
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub project: Option<Project>,
    pub body: Value,
    pub editor: Option<EditorContext>,
}

impl OperationContext {
    pub fn new(body: Value) -> Self {
        Self {
            project: None,
            body,
            editor: None,
        }
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_editor(mut self, editor: EditorContext) -> Self {
        self.editor = Some(editor);
        self
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

/// A single executable unit of backend work.
///
/// Instances are constructed per invocation by a registry factory and
/// consumed by `execute`; they are never reused. A successful result is
/// either a plain string (wrapped as `{ "message": ... }` by the
/// dispatcher) or a structured JSON value.
#[async_trait]
pub trait Operation: Send {
    async fn execute(self: Box<Self>) -> anyhow::Result<Value>;
}

/// Adapter turning a plain closure into an [`Operation`].
///
/// Useful for operations with no I/O of their own; anything that suspends
/// implements the trait directly.
pub struct FnOperation<F> {
    ctx: OperationContext,
    run: F,
}

impl<F> FnOperation<F>
where
    F: Fn(OperationContext) -> anyhow::Result<Value> + Send,
{
    pub fn new(ctx: OperationContext, run: F) -> Self {
        Self { ctx, run }
    }
}

#[async_trait]
impl<F> Operation for FnOperation<F>
where
    F: Fn(OperationContext) -> anyhow::Result<Value> + Send,
{
    async fn execute(self: Box<Self>) -> anyhow::Result<Value> {
        (self.run)(self.ctx)
    }
}
