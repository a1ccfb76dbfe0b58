//! Error types for the tree crate.

/// Errors from decoding or encoding payload trees.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The root node did not carry the expected tag.
    #[error("unexpected tag: expected {expected}, got {actual}")]
    UnexpectedTag { expected: String, actual: String },
}

/// Result alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
