//! Diff primitives for Stave.
//!
//! Compares two snapshots of a versionable document node and produces typed
//! delta diffs: atomic replacements for scalar values and added / removed /
//! changed groups for id-keyed record collections.
//!
//! # Key Types
//!
//! - [`DeltaDiff`] -- One delta paired with its payload tree
//! - [`Diff`] -- Ordered result of a diff or merge, convertible into a snapshot
//! - [`TrackedItem`] -- Capability surface of a versionable document node
//! - [`ItemSnapshot`] -- Owned, serializable tracked item
//! - [`RecordChanges`] -- Id-keyed comparison of two record sets

pub mod collection;
pub mod delta_diff;
pub mod diff;
pub mod error;
pub mod scalar;
pub mod tracked;

pub use collection::{compare_records, create_records_diffs, RecordChanges};
pub use delta_diff::DeltaDiff;
pub use diff::Diff;
pub use error::{DiffError, DiffResult};
pub use scalar::ScalarDiffFn;
pub use tracked::{ItemSnapshot, TrackedItem};
