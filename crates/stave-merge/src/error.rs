//! Error types for the merge crate.

use stave_diff::DiffError;
use stave_types::NodeKind;

/// Errors that can occur at the checked entry points of the merge engine.
///
/// Diffing and merging themselves are total; errors only arise when inputs
/// cannot be paired or configuration cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The two items are different kinds of document node.
    #[error("node kind mismatch: expected {expected}, got {actual}")]
    KindMismatch { expected: NodeKind, actual: NodeKind },

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Encoding a diff failed.
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
