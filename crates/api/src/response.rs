//! Shared response types for API handlers.
//!
//! Dispatch outcomes use the core [`Envelope`](dispatchd_core::envelope::Envelope)
//! directly; this module holds the transport-only shapes layered around it.

use serde::Serialize;

use dispatchd_core::types::Token;

/// `{ "status": "pending", "id": ... }`, returned on asynchronous
/// submission and on every status check while the job is still running.
#[derive(Debug, Serialize)]
pub struct PendingResponse {
    pub status: &'static str,
    pub id: Token,
}

impl PendingResponse {
    pub fn new(id: Token) -> Self {
        Self {
            status: "pending",
            id,
        }
    }
}
