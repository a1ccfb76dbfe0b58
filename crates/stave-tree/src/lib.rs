//! Serialized payload trees for Stave.
//!
//! Every delta payload, and every record inside a collection payload, is a
//! [`SerializedTree`]: a node with a tag, a set of primitive attributes and an
//! ordered list of child nodes. The diff engine never interprets payloads
//! beyond tag lookup and equivalence; record crates map their types onto
//! trees through the constants in [`schema`].
//!
//! # Design Rules
//!
//! 1. Trees are plain owned values. Cloning is a deep copy; nothing aliases.
//! 2. Attributes are kept in a sorted map so serialization is canonical.
//! 3. Child order is significant and preserved.

pub mod error;
pub mod schema;
pub mod tree;

pub use error::{TreeError, TreeResult};
pub use tree::{AttributeValue, SerializedTree};
