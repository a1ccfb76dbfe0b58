use stave_tree::{schema, SerializedTree};
use stave_types::{CollectionKind, RecordId};

use crate::record::{read_f64, read_i32, read_id, record_node, Record};

/// An instance of a track's pattern placed on the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    pub id: RecordId,
    pub beat: f64,
    /// Transposition in semitones.
    pub key: i32,
    pub velocity: f64,
    pub mute: bool,
    pub solo: bool,
}

impl Clip {
    pub fn new(id: impl Into<RecordId>, beat: f64) -> Self {
        Self {
            id: id.into(),
            beat,
            key: 0,
            velocity: 1.0,
            mute: false,
            solo: false,
        }
    }

    pub fn transposed(mut self, key: i32) -> Self {
        self.key = key;
        self
    }

    pub fn muted(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }
}

impl Record for Clip {
    const KIND: CollectionKind = CollectionKind::Clips;
    const TAG: &'static str = schema::CLIP;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn beat(&self) -> f64 {
        self.beat
    }

    fn has_changed_from(&self, other: &Self) -> bool {
        self.beat.total_cmp(&other.beat).is_ne()
            || self.key != other.key
            || self.velocity.total_cmp(&other.velocity).is_ne()
            || self.mute != other.mute
            || self.solo != other.solo
    }

    fn to_tree(&self) -> SerializedTree {
        record_node(Self::TAG, &self.id, self.beat)
            .with_attribute(schema::KEY, self.key)
            .with_attribute(schema::VELOCITY, self.velocity)
            .with_attribute(schema::MUTE, self.mute)
            .with_attribute(schema::SOLO, self.solo)
    }

    fn from_tree(tree: &SerializedTree) -> Option<Self> {
        if !tree.has_tag(Self::TAG) {
            return None;
        }
        Some(Self {
            id: read_id(tree)?,
            beat: read_f64(tree, schema::BEAT)?,
            key: read_i32(tree, schema::KEY).unwrap_or(0),
            velocity: read_f64(tree, schema::VELOCITY).unwrap_or(1.0),
            mute: tree.get_bool(schema::MUTE).unwrap_or(false),
            solo: tree.get_bool(schema::SOLO).unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_roundtrip() {
        let clip = Clip::new("c1", 8.0).transposed(-12).muted(true);
        assert_eq!(Clip::from_tree(&clip.to_tree()), Some(clip));
    }

    #[test]
    fn older_clip_nodes_get_defaults() {
        let tree = SerializedTree::new(schema::CLIP)
            .with_attribute(schema::ID, "c1")
            .with_attribute(schema::BEAT, 0.0f64);
        let clip = Clip::from_tree(&tree).unwrap();
        assert_eq!(clip, Clip::new("c1", 0.0));
    }

    #[test]
    fn mute_toggle_is_a_change() {
        let clip = Clip::new("c1", 0.0);
        assert!(clip.clone().muted(true).has_changed_from(&clip));
    }
}
