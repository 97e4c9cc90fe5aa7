//! The slice of the project model the dispatcher needs.
//!
//! The on-disk project layout, workspace scanning, and credential storage
//! live outside this core; a [`Project`] here is identity plus credential
//! health.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stored-credential state for a project's remote-platform connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialState {
    #[default]
    Valid,
    RequiresReauth,
}

/// The target project a command operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub credentials: CredentialState,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            credentials: CredentialState::Valid,
        }
    }

    /// Mark the project's stored credentials as stale.
    pub fn with_stale_credentials(mut self) -> Self {
        self.credentials = CredentialState::RequiresReauth;
        self
    }

    pub fn requires_reauth(&self) -> bool {
        self.credentials == CredentialState::RequiresReauth
    }
}
