//! Pre-dispatch credential policy.
//!
//! A pure decision, applied before registry lookup so the dispatch path
//! itself never branches on credential state.

use crate::project::Project;

/// Operation substituted when a CLI invocation targets a project whose
/// stored credentials need re-authentication.
pub const REAUTH_OPERATION: &str = "oauth-project";

/// How the caller reached the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerMode {
    /// One-shot process: print an envelope and exit.
    Cli,
    /// Long-lived server answering HTTP requests.
    Server,
}

/// Decide which operation actually runs for a request.
///
/// CLI invocations against a project with stale credentials are redirected
/// to [`REAUTH_OPERATION`]; every other request runs the name it asked for.
pub fn effective_operation<'a>(
    requested: &'a str,
    mode: CallerMode,
    project: Option<&Project>,
) -> &'a str {
    match (mode, project) {
        (CallerMode::Cli, Some(project)) if project.requires_reauth() => REAUTH_OPERATION,
        _ => requested,
    }
}
