//! Records of the project timeline: annotations, key signatures and time
//! signatures.

use stave_tree::{schema, SerializedTree};
use stave_types::{CollectionKind, RecordId};

use crate::record::{read_f64, read_i32, read_id, record_node, Record};

/// A labelled, coloured marker on the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub id: RecordId,
    pub beat: f64,
    pub length: f64,
    pub description: String,
    /// ARGB colour.
    pub colour: u32,
}

impl Annotation {
    pub fn new(id: impl Into<RecordId>, beat: f64, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            beat,
            length: 0.0,
            description: description.into(),
            colour: 0xffff_ffff,
        }
    }
}

impl Record for Annotation {
    const KIND: CollectionKind = CollectionKind::Annotations;
    const TAG: &'static str = schema::ANNOTATION;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn beat(&self) -> f64 {
        self.beat
    }

    fn has_changed_from(&self, other: &Self) -> bool {
        self.beat.total_cmp(&other.beat).is_ne()
            || self.length.total_cmp(&other.length).is_ne()
            || self.description != other.description
            || self.colour != other.colour
    }

    fn to_tree(&self) -> SerializedTree {
        record_node(Self::TAG, &self.id, self.beat)
            .with_attribute(schema::LENGTH, self.length)
            .with_attribute(schema::DESCRIPTION, self.description.as_str())
            .with_attribute(schema::COLOUR, self.colour)
    }

    fn from_tree(tree: &SerializedTree) -> Option<Self> {
        if !tree.has_tag(Self::TAG) {
            return None;
        }
        Some(Self {
            id: read_id(tree)?,
            beat: read_f64(tree, schema::BEAT)?,
            length: read_f64(tree, schema::LENGTH).unwrap_or(0.0),
            description: tree.get_str(schema::DESCRIPTION).unwrap_or_default().to_string(),
            colour: tree
                .get_i64(schema::COLOUR)
                .and_then(|c| u32::try_from(c).ok())
                .unwrap_or(0xffff_ffff),
        })
    }
}

/// A key change: root key and scale name.
#[derive(Clone, Debug, PartialEq)]
pub struct KeySignature {
    pub id: RecordId,
    pub beat: f64,
    pub root_key: i32,
    pub scale: String,
}

impl KeySignature {
    pub fn new(id: impl Into<RecordId>, beat: f64, root_key: i32, scale: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            beat,
            root_key,
            scale: scale.into(),
        }
    }
}

impl Record for KeySignature {
    const KIND: CollectionKind = CollectionKind::KeySignatures;
    const TAG: &'static str = schema::KEY_SIGNATURE;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn beat(&self) -> f64 {
        self.beat
    }

    fn has_changed_from(&self, other: &Self) -> bool {
        self.beat.total_cmp(&other.beat).is_ne()
            || self.root_key != other.root_key
            || self.scale != other.scale
    }

    fn to_tree(&self) -> SerializedTree {
        record_node(Self::TAG, &self.id, self.beat)
            .with_attribute(schema::ROOT_KEY, self.root_key)
            .with_attribute(schema::SCALE, self.scale.as_str())
    }

    fn from_tree(tree: &SerializedTree) -> Option<Self> {
        if !tree.has_tag(Self::TAG) {
            return None;
        }
        Some(Self {
            id: read_id(tree)?,
            beat: read_f64(tree, schema::BEAT)?,
            root_key: read_i32(tree, schema::ROOT_KEY).unwrap_or(0),
            scale: tree.get_str(schema::SCALE).unwrap_or_default().to_string(),
        })
    }
}

/// A meter change on the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSignature {
    pub id: RecordId,
    pub beat: f64,
    pub numerator: i32,
    pub denominator: i32,
}

impl TimeSignature {
    pub fn new(id: impl Into<RecordId>, beat: f64, numerator: i32, denominator: i32) -> Self {
        Self {
            id: id.into(),
            beat,
            numerator,
            denominator,
        }
    }
}

impl Record for TimeSignature {
    const KIND: CollectionKind = CollectionKind::TimeSignatures;
    const TAG: &'static str = schema::TIME_SIGNATURE;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn beat(&self) -> f64 {
        self.beat
    }

    fn has_changed_from(&self, other: &Self) -> bool {
        self.beat.total_cmp(&other.beat).is_ne()
            || self.numerator != other.numerator
            || self.denominator != other.denominator
    }

    fn to_tree(&self) -> SerializedTree {
        record_node(Self::TAG, &self.id, self.beat)
            .with_attribute(schema::NUMERATOR, self.numerator)
            .with_attribute(schema::DENOMINATOR, self.denominator)
    }

    fn from_tree(tree: &SerializedTree) -> Option<Self> {
        if !tree.has_tag(Self::TAG) {
            return None;
        }
        Some(Self {
            id: read_id(tree)?,
            beat: read_f64(tree, schema::BEAT)?,
            numerator: read_i32(tree, schema::NUMERATOR).unwrap_or(4),
            denominator: read_i32(tree, schema::DENOMINATOR).unwrap_or(4),
        })
    }
}
