use stave_tree::{schema, SerializedTree};
use stave_types::{CollectionKind, RecordId};

use crate::record::{read_f64, read_i32, read_id, record_node, Record};

/// A piano-roll note.
#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    pub id: RecordId,
    pub key: i32,
    pub beat: f64,
    pub length: f64,
    pub velocity: f64,
}

impl Note {
    pub fn new(id: impl Into<RecordId>, key: i32, beat: f64, length: f64, velocity: f64) -> Self {
        Self {
            id: id.into(),
            key,
            beat,
            length,
            velocity,
        }
    }
}

impl Record for Note {
    const KIND: CollectionKind = CollectionKind::Notes;
    const TAG: &'static str = schema::NOTE;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn beat(&self) -> f64 {
        self.beat
    }

    fn has_changed_from(&self, other: &Self) -> bool {
        self.key != other.key
            || self.beat.total_cmp(&other.beat).is_ne()
            || self.length.total_cmp(&other.length).is_ne()
            || self.velocity.total_cmp(&other.velocity).is_ne()
    }

    fn to_tree(&self) -> SerializedTree {
        record_node(Self::TAG, &self.id, self.beat)
            .with_attribute(schema::KEY, self.key)
            .with_attribute(schema::LENGTH, self.length)
            .with_attribute(schema::VELOCITY, self.velocity)
    }

    fn from_tree(tree: &SerializedTree) -> Option<Self> {
        if !tree.has_tag(Self::TAG) {
            return None;
        }
        Some(Self {
            id: read_id(tree)?,
            key: read_i32(tree, schema::KEY)?,
            beat: read_f64(tree, schema::BEAT)?,
            length: read_f64(tree, schema::LENGTH).unwrap_or(1.0),
            velocity: read_f64(tree, schema::VELOCITY).unwrap_or(1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_roundtrip() {
        let note = Note::new("n1", 60, 4.0, 0.5, 0.8);
        assert_eq!(Note::from_tree(&note.to_tree()), Some(note));
    }

    #[test]
    fn key_is_required() {
        let tree = SerializedTree::new(schema::NOTE)
            .with_attribute(schema::ID, "n1")
            .with_attribute(schema::BEAT, 0.0f64);
        assert!(Note::from_tree(&tree).is_none());
    }

    #[test]
    fn transposition_is_a_change() {
        let a = Note::new("n1", 60, 0.0, 1.0, 1.0);
        let b = Note::new("n1", 62, 0.0, 1.0, 1.0);
        assert!(b.has_changed_from(&a));
    }
}
