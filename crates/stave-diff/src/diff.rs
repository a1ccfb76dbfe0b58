//! The result container of diffing and merging.

use serde::{Deserialize, Serialize};
use stave_tree::SerializedTree;
use stave_types::{ContentDigest, Delta, DeltaType, NodeKind};

use crate::delta_diff::DeltaDiff;
use crate::error::{DiffError, DiffResult};
use crate::tracked::{ItemSnapshot, TrackedItem};

/// An ordered collection of delta diffs for one document node.
///
/// A `Diff` owns its deltas until it is turned into an [`ItemSnapshot`],
/// which then owns them as the node's new delta set. A `Diff` is itself a
/// [`TrackedItem`], so a diff can be merged onto a prior state directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    kind: NodeKind,
    deltas: Vec<DeltaDiff>,
}

impl Diff {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            deltas: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn apply_delta(&mut self, delta: DeltaDiff) {
        self.deltas.push(delta);
    }

    pub fn apply(&mut self, delta: Delta, payload: SerializedTree) {
        self.apply_delta(DeltaDiff::new(delta, payload));
    }

    pub fn apply_deltas(&mut self, deltas: impl IntoIterator<Item = DeltaDiff>) {
        self.deltas.extend(deltas);
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeltaDiff> {
        self.deltas.iter()
    }

    /// The first delta of exactly `delta_type`.
    pub fn get(&self, delta_type: DeltaType) -> Option<&DeltaDiff> {
        self.deltas.iter().find(|d| d.delta_type() == delta_type)
    }

    pub fn delta_types(&self) -> Vec<DeltaType> {
        self.deltas.iter().map(DeltaDiff::delta_type).collect()
    }

    /// Returns `true` if every payload carries its delta type's tag.
    pub fn is_consistent(&self) -> bool {
        self.deltas.iter().all(DeltaDiff::is_consistent)
    }

    pub fn into_deltas(self) -> Vec<DeltaDiff> {
        self.deltas
    }

    /// Hand the deltas over to a new snapshot of the node.
    pub fn into_snapshot(self) -> ItemSnapshot {
        ItemSnapshot::from_deltas(self.kind, self.deltas)
    }

    /// BLAKE3 digest of the canonical JSON encoding.
    ///
    /// Identical inputs to a diff or merge produce identical digests.
    pub fn digest(&self) -> DiffResult<ContentDigest> {
        let bytes = serde_json::to_vec(self).map_err(|e| DiffError::Serialization(e.to_string()))?;
        Ok(ContentDigest::of(&bytes))
    }

    pub fn to_json(&self) -> DiffResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a DeltaDiff;
    type IntoIter = std::slice::Iter<'a, DeltaDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.iter()
    }
}

impl From<Diff> for ItemSnapshot {
    fn from(diff: Diff) -> Self {
        diff.into_snapshot()
    }
}

impl TrackedItem for Diff {
    fn identity_type(&self) -> NodeKind {
        self.kind
    }

    fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    fn delta_at(&self, index: usize) -> Option<&Delta> {
        self.deltas.get(index).map(|d| &d.delta)
    }

    fn delta_payload_at(&self, index: usize) -> Option<SerializedTree> {
        self.deltas.get(index).map(|d| d.payload.clone())
    }
}
