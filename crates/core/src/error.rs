#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Authentication failed. The message is for logs only; responses must
    /// never disclose which check failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The room has no persisted events left to remove.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The room's undo stack is empty.
    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Internal error: {0}")]
    Internal(String),
}
