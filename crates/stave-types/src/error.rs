use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown delta type tag: {0}")]
    UnknownDeltaType(String),

    #[error("unknown node kind: {0}")]
    UnknownNodeKind(String),
}
