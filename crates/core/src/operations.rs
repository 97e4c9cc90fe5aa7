//! Built-in operations.
//!
//! The real catalog (metadata CRUD, compilation, deployment, tests, ...)
//! is registered by the host; these keep the server and CLI usable
//! stand-alone and give the credential policy a resolvable target.

use async_trait::async_trait;
use serde_json::Value;

use crate::operation::{Operation, OperationContext};
use crate::policy::REAUTH_OPERATION;
use crate::registry::OperationRegistry;

/// Liveness probe: returns the string `"pong"`.
struct Ping;

#[async_trait]
impl Operation for Ping {
    async fn execute(self: Box<Self>) -> anyhow::Result<Value> {
        Ok(Value::String("pong".into()))
    }
}

/// Returns the request body verbatim.
struct Echo {
    ctx: OperationContext,
}

#[async_trait]
impl Operation for Echo {
    async fn execute(self: Box<Self>) -> anyhow::Result<Value> {
        Ok(self.ctx.body)
    }
}

/// Credential refresh for a project whose stored credentials went stale.
///
/// Opens the platform's OAuth flow in the initiating editor when a window
/// callback is available; either way, tells the caller what to do next.
struct OauthProject {
    ctx: OperationContext,
}

#[async_trait]
impl Operation for OauthProject {
    async fn execute(self: Box<Self>) -> anyhow::Result<Value> {
        let project_name = self
            .ctx
            .project
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("this project");

        let auth_url = format!("/auth/connect?project={project_name}");
        let opened = self
            .ctx
            .editor
            .as_ref()
            .is_some_and(|editor| editor.open_window(&auth_url));

        if opened {
            tracing::info!(project = %project_name, "Opened re-authentication window");
        }

        Ok(Value::String(format!(
            "Credentials for {project_name} must be refreshed; complete the authentication flow at {auth_url}"
        )))
    }
}

/// The enumerated set of operations this crate ships.
pub fn builtin_registry() -> OperationRegistry {
    let mut registry = OperationRegistry::new();

    // Names in the fixed list are unique; a duplicate is a defect worth
    // failing startup over.
    registry
        .register("ping", Box::new(|_ctx| Box::new(Ping)))
        .expect("builtin operation names are unique");
    registry
        .register("echo", Box::new(|ctx| Box::new(Echo { ctx })))
        .expect("builtin operation names are unique");
    registry
        .register(
            REAUTH_OPERATION,
            Box::new(|ctx| Box::new(OauthProject { ctx })),
        )
        .expect("builtin operation names are unique");

    registry
}
