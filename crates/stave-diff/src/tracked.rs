//! The capability surface of a versionable document node.

use serde::{Deserialize, Serialize};
use stave_tree::SerializedTree;
use stave_types::{Delta, DeltaDescription, DeltaFamily, DeltaType, NodeKind};

use crate::delta_diff::DeltaDiff;
use crate::error::{DiffError, DiffResult};

/// A document node whose state is expressed as a set of deltas.
///
/// Implementations must hold at most one delta of each type. Payloads are
/// returned as owned copies; a node may serialize its current state on
/// demand.
pub trait TrackedItem {
    /// The node kind, used to pick the diff logic.
    fn identity_type(&self) -> NodeKind;

    fn delta_count(&self) -> usize;

    /// The delta at `index`, or `None` if out of range.
    fn delta_at(&self, index: usize) -> Option<&Delta>;

    /// A copy of the payload of the delta at `index`. `None` means the
    /// payload is missing and is treated as the type's default value.
    fn delta_payload_at(&self, index: usize) -> Option<SerializedTree>;

    /// Returns `true` if the payload at `index` is missing or empty.
    fn delta_has_default_payload(&self, index: usize) -> bool {
        self.delta_payload_at(index)
            .map_or(true, |payload| payload.is_empty())
    }

    /// Index of the delta of exactly `delta_type`.
    fn find_delta(&self, delta_type: DeltaType) -> Option<usize> {
        (0..self.delta_count()).find(|&i| self.delta_at(i).is_some_and(|d| d.has_type(delta_type)))
    }

    /// Returns `true` if any delta belongs to `family`.
    fn has_family(&self, family: DeltaFamily) -> bool {
        (0..self.delta_count()).any(|i| self.delta_at(i).is_some_and(|d| d.family() == family))
    }
}

/// An owned tracked item: the delta set of one document node at one point in
/// history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    kind: NodeKind,
    deltas: Vec<DeltaDiff>,
}

impl ItemSnapshot {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            deltas: Vec::new(),
        }
    }

    /// Build from a list of deltas. A later delta replaces an earlier one of
    /// the same type.
    pub fn from_deltas(kind: NodeKind, deltas: impl IntoIterator<Item = DeltaDiff>) -> Self {
        let mut snapshot = Self::new(kind);
        for delta in deltas {
            snapshot.insert(delta);
        }
        snapshot
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Insert a delta, replacing the existing delta of the same type in place.
    pub fn insert(&mut self, delta: DeltaDiff) {
        match self
            .deltas
            .iter_mut()
            .find(|d| d.delta_type() == delta.delta_type())
        {
            Some(existing) => *existing = delta,
            None => self.deltas.push(delta),
        }
    }

    /// Builder: insert `payload` as the head-state delta of `delta_type`.
    pub fn with_payload(mut self, delta_type: DeltaType, payload: SerializedTree) -> Self {
        self.insert(DeltaDiff::from_parts(
            delta_type,
            DeltaDescription::head_state(),
            payload,
        ));
        self
    }

    pub fn deltas(&self) -> &[DeltaDiff] {
        &self.deltas
    }

    pub fn get(&self, delta_type: DeltaType) -> Option<&DeltaDiff> {
        self.deltas.iter().find(|d| d.delta_type() == delta_type)
    }

    pub fn payload(&self, delta_type: DeltaType) -> Option<&SerializedTree> {
        self.get(delta_type).map(|d| &d.payload)
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn to_json(&self) -> DiffResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }

    /// Decode a snapshot, rejecting payloads whose tag does not match their
    /// delta type. Repeated delta types collapse to the last occurrence.
    pub fn from_json(json: &str) -> DiffResult<Self> {
        let raw: ItemSnapshot =
            serde_json::from_str(json).map_err(|e| DiffError::Serialization(e.to_string()))?;
        for delta in &raw.deltas {
            delta.validate()?;
        }
        Ok(Self::from_deltas(raw.kind, raw.deltas))
    }
}

impl TrackedItem for ItemSnapshot {
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

    fn delta_has_default_payload(&self, index: usize) -> bool {
        self.deltas.get(index).map_or(true, |d| d.payload.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_model::scalar;

    #[test]
    fn insert_replaces_same_type() {
        let snapshot = ItemSnapshot::new(NodeKind::PianoTrack)
            .with_payload(DeltaType::TrackPath, scalar::track_path("A"))
            .with_payload(DeltaType::TrackColour, scalar::track_colour(1))
            .with_payload(DeltaType::TrackPath, scalar::track_path("B"));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.deltas()[0].delta_type(), DeltaType::TrackPath);
        assert_eq!(
            scalar::read_path(snapshot.payload(DeltaType::TrackPath).unwrap()),
            Some("B")
        );
    }

    #[test]
    fn tracked_item_surface() {
        let snapshot = ItemSnapshot::new(NodeKind::AutomationTrack)
            .with_payload(DeltaType::TrackPath, scalar::track_path("Cutoff"))
            .with_payload(
                DeltaType::AutoEventsAdded,
                SerializedTree::new(DeltaType::AutoEventsAdded.as_str()),
            );

        assert_eq!(snapshot.identity_type(), NodeKind::AutomationTrack);
        assert_eq!(snapshot.delta_count(), 2);
        assert!(snapshot.delta_at(0).unwrap().has_type(DeltaType::TrackPath));
        assert!(snapshot.delta_at(2).is_none());
        assert!(!snapshot.delta_has_default_payload(0));
        assert!(snapshot.delta_has_default_payload(1));
        assert!(snapshot.delta_has_default_payload(5));
        assert_eq!(snapshot.find_delta(DeltaType::AutoEventsAdded), Some(1));
        assert_eq!(snapshot.find_delta(DeltaType::AutoEventsRemoved), None);
        assert!(snapshot.has_family(DeltaType::AutoEventsChanged.family()));
        assert!(!snapshot.has_family(DeltaType::ClipsAdded.family()));
    }

    #[test]
    fn payload_copies_are_independent() {
        let snapshot = ItemSnapshot::new(NodeKind::PianoTrack)
            .with_payload(DeltaType::TrackPath, scalar::track_path("A"));
        let mut copy = snapshot.delta_payload_at(0).unwrap();
        copy.set_attribute("path", "changed");
        assert_eq!(
            scalar::read_path(snapshot.payload(DeltaType::TrackPath).unwrap()),
            Some("A")
        );
    }

    #[test]
    fn json_roundtrip() {
        let snapshot = ItemSnapshot::new(NodeKind::ProjectInfo).with_payload(
            DeltaType::ProjectTitle,
            scalar::project_text(DeltaType::ProjectTitle, "Etude"),
        );
        let json = snapshot.to_json().unwrap();
        assert_eq!(ItemSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn from_json_rejects_mistagged_payload() {
        let snapshot = ItemSnapshot::new(NodeKind::PianoTrack)
            .with_payload(DeltaType::TrackPath, scalar::track_colour(3));
        let json = snapshot.to_json().unwrap();
        assert!(matches!(
            ItemSnapshot::from_json(&json),
            Err(DiffError::PayloadTagMismatch { .. })
        ));
    }
}
