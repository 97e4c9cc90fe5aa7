//! In-memory ledger of asynchronous jobs.
//!
//! Each tracked job moves `pending -> complete -> removed`. The table is
//! the only shared mutable state in this core; it is designed to be
//! wrapped in `Arc` and handed explicitly to whichever component issues
//! tokens and serves polls.
//!
//! Every method is synchronous and holds the table lock only for the
//! duration of the call, so `enqueue`, `complete`, and `pop` are
//! indivisible with respect to each other and a reader never observes a
//! half-written record.
//!
//! Records abandoned by their poller are never reaped; they live for the
//! process lifetime.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::Token;

/// Failure captured from a finished job.
///
/// `message` is what pollers see; `stack` (the full diagnostic chain)
/// stays host-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl JobError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }
}

impl From<&CoreError> for JobError {
    fn from(err: &CoreError) -> Self {
        Self {
            message: err.to_string(),
            stack: Some(format!("{err:?}")),
        }
    }
}

/// A single tracked job.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub id: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Process-wide table of in-flight and completed asynchronous jobs.
pub struct JobTracker {
    jobs: Mutex<HashMap<Token, JobRecord>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(HashMap::new()),
        }
    }

    fn table(&self) -> MutexGuard<'_, HashMap<Token, JobRecord>> {
        self.jobs.lock().expect("job table mutex poisoned")
    }

    /// Insert a pending record and hand back its token.
    ///
    /// Tokens are v7 UUIDs: unique under concurrent enqueues and
    /// time-ordered.
    pub fn enqueue(&self, operation: Option<String>) -> Token {
        let token = Token::now_v7();
        let record = JobRecord {
            id: token,
            operation,
            complete: false,
            result: None,
            error: None,
            stack: None,
        };
        self.table().insert(token, record);
        tracing::debug!(token = %token, "Job enqueued");
        token
    }

    /// Whether the job has finished.
    ///
    /// A token that was popped (or never existed) fails with
    /// [`CoreError::UnknownToken`]; "consumed" and "never existed" are
    /// indistinguishable to pollers.
    pub fn is_complete(&self, token: &Token) -> Result<bool, CoreError> {
        self.table()
            .get(token)
            .map(|record| record.complete)
            .ok_or(CoreError::UnknownToken(*token))
    }

    /// The single `pending -> complete` transition.
    ///
    /// Exactly one of `error` / `result` must be supplied, and a token
    /// completes exactly once; violations fail loudly with
    /// [`CoreError::InvariantViolation`] instead of leaving a token stuck
    /// or silently overwriting an outcome. The `complete` flag is set
    /// last, after the outcome fields are written.
    pub fn complete(
        &self,
        token: &Token,
        error: Option<JobError>,
        result: Option<Value>,
    ) -> Result<(), CoreError> {
        if error.is_none() && result.is_none() {
            tracing::error!(token = %token, "Job completed with neither an error nor a result");
            return Err(CoreError::InvariantViolation(format!(
                "job {token} completed with neither an error nor a result"
            )));
        }

        let mut table = self.table();
        let record = table
            .get_mut(token)
            .ok_or(CoreError::UnknownToken(*token))?;

        if record.complete {
            tracing::error!(token = %token, "Job completed twice");
            return Err(CoreError::InvariantViolation(format!(
                "job {token} completed twice"
            )));
        }

        match error {
            Some(err) => {
                record.error = Some(err.message);
                record.stack = err.stack;
            }
            None => record.result = result,
        }
        record.complete = true;

        tracing::debug!(token = %token, failed = record.error.is_some(), "Job completed");
        Ok(())
    }

    /// Read and remove: the consuming half of the polling protocol.
    ///
    /// A token pops at most once; the removal happens under the same lock
    /// as the read, so a second `pop` for the same token fails with
    /// [`CoreError::UnknownToken`] and a result is delivered to exactly
    /// one poller.
    pub fn pop(&self, token: &Token) -> Result<JobRecord, CoreError> {
        self.table()
            .remove(token)
            .ok_or(CoreError::UnknownToken(*token))
    }

    /// Read without removing.
    pub fn peek(&self, token: &Token) -> Result<JobRecord, CoreError> {
        self.table()
            .get(token)
            .cloned()
            .ok_or(CoreError::UnknownToken(*token))
    }

    /// Number of records currently in the table (pending and completed).
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new()
    }
}
