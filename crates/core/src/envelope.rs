//! The uniform response envelope handed to every caller convention.
//!
//! CLI, synchronous HTTP, and polling consumers all receive the same
//! `{ "result": ... }` / `{ "error": { "message": ... } }` shape, so no
//! caller has to branch on where a failure originated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Error half of the envelope: a human-readable message only.
///
/// Host-side diagnostics (full error chains) stay in logs and the job
/// ledger; they are never serialized back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Normalized outcome of a dispatched command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Success { result: Value },
    Failure { error: ErrorDetail },
}

impl Envelope {
    /// Wrap an already-normalized result value.
    pub fn success(result: Value) -> Self {
        Self::Success { result }
    }

    /// Wrap a failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error: ErrorDetail {
                message: message.into(),
            },
        }
    }

    /// Fold a dispatch outcome into the envelope.
    pub fn from_result(outcome: Result<Value, CoreError>) -> Self {
        match outcome {
            Ok(result) => Self::success(result),
            Err(err) => Self::failure(err.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Process exit status for a one-shot CLI caller: 0 on success, 1 on
    /// error.
    pub fn exit_code(&self) -> i32 {
        if self.is_error() {
            1
        } else {
            0
        }
    }
}

/// Plain-string operation results become `{ "message": ... }` so callers
/// can always expect an object for string-valued outcomes.
pub fn wrap_string_result(value: Value) -> Value {
    match value {
        Value::String(message) => serde_json::json!({ "message": message }),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_results_are_wrapped_as_message_objects() {
        let wrapped = wrap_string_result(json!("Metadata successfully indexed"));
        assert_eq!(wrapped, json!({ "message": "Metadata successfully indexed" }));
    }

    #[test]
    fn structured_results_pass_through_unchanged() {
        let value = json!({ "ok": true, "count": 3 });
        assert_eq!(wrap_string_result(value.clone()), value);
    }

    #[test]
    fn success_serializes_under_result() {
        let envelope = Envelope::success(json!({ "ok": true }));
        let serialized = serde_json::to_value(&envelope).unwrap();
        assert_eq!(serialized, json!({ "result": { "ok": true } }));
    }

    #[test]
    fn failure_serializes_under_error_message() {
        let envelope = Envelope::failure("boom");
        let serialized = serde_json::to_value(&envelope).unwrap();
        assert_eq!(serialized, json!({ "error": { "message": "boom" } }));
    }

    #[test]
    fn from_result_maps_err_to_failure() {
        let envelope =
            Envelope::from_result(Err(CoreError::UnknownOperation("unknown-op".into())));
        assert_eq!(
            envelope,
            Envelope::failure("Command not supported: unknown-op")
        );
    }

    #[test]
    fn exit_codes_follow_outcome() {
        assert_eq!(Envelope::success(json!(null)).exit_code(), 0);
        assert_eq!(Envelope::failure("boom").exit_code(), 1);
    }
}
