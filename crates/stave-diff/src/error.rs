//! Error types for the diff crate.

use stave_types::DeltaType;

/// Errors that can occur while encoding or decoding diffs and snapshots.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A payload root did not carry its delta type's tag.
    #[error("payload of {delta_type} delta is tagged {tag}")]
    PayloadTagMismatch { delta_type: DeltaType, tag: String },

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
