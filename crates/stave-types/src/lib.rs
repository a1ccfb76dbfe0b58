//! Foundation types for Stave.
//!
//! Stave versions tree-shaped project documents (tracks, event sequences,
//! clips, project metadata) by recording typed deltas against each document
//! node. This crate holds the vocabulary every other Stave crate shares.
//!
//! # Key Types
//!
//! - [`DeltaType`] -- Closed set of change kinds a document node can record
//! - [`DeltaFamily`] / [`CollectionKind`] -- Groups of delta types reconciled together
//! - [`Delta`] / [`DeltaDescription`] -- Typed change record without payload
//! - [`NodeKind`] -- Identity type of a versionable document node
//! - [`RecordId`] -- Stable identity of an event, note, clip or marker
//! - [`ContentDigest`] -- BLAKE3 digest used to compare computed results across peers

pub mod delta;
pub mod digest;
pub mod error;
pub mod node;
pub mod record;

pub use delta::{CollectionKind, CollectionOp, Delta, DeltaDescription, DeltaFamily, DeltaType};
pub use digest::ContentDigest;
pub use error::TypeError;
pub use node::NodeKind;
pub use record::RecordId;
