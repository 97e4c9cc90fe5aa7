use crate::types::Token;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Command not supported: {0}")]
    UnknownOperation(String),

    #[error("Command already registered: {0}")]
    DuplicateOperation(String),

    #[error("Unsupported editor: {0}")]
    UnsupportedEditor(String),

    #[error("Unknown job token: {0}")]
    UnknownToken(Token),

    #[error(transparent)]
    Execution(#[from] anyhow::Error),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
