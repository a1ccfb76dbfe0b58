//! Delta types and the change records built from them.
//!
//! A [`DeltaType`] names one kind of change a document node can carry. Scalar
//! types (path, colour, ...) hold a single atomic value. Collection types come
//! in Added/Removed/Changed triples over one kind of id-keyed record; all three
//! ops of a [`CollectionKind`] belong to the same [`DeltaFamily`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of change recorded by a delta.
///
/// The serialized tag (see [`DeltaType::as_str`]) is also the tag of the
/// payload tree that accompanies the delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaType {
    TrackPath,
    TrackColour,
    TrackInstrument,
    TrackController,
    TrackTimeSignature,

    ProjectTitle,
    ProjectAuthor,
    ProjectDescription,
    ProjectLicense,

    AutoEventsAdded,
    AutoEventsRemoved,
    AutoEventsChanged,

    NotesAdded,
    NotesRemoved,
    NotesChanged,

    ClipsAdded,
    ClipsRemoved,
    ClipsChanged,

    AnnotationsAdded,
    AnnotationsRemoved,
    AnnotationsChanged,

    KeySignaturesAdded,
    KeySignaturesRemoved,
    KeySignaturesChanged,

    TimeSignaturesAdded,
    TimeSignaturesRemoved,
    TimeSignaturesChanged,
}

impl DeltaType {
    /// Every delta type, in declaration order.
    pub const ALL: [DeltaType; 27] = [
        Self::TrackPath,
        Self::TrackColour,
        Self::TrackInstrument,
        Self::TrackController,
        Self::TrackTimeSignature,
        Self::ProjectTitle,
        Self::ProjectAuthor,
        Self::ProjectDescription,
        Self::ProjectLicense,
        Self::AutoEventsAdded,
        Self::AutoEventsRemoved,
        Self::AutoEventsChanged,
        Self::NotesAdded,
        Self::NotesRemoved,
        Self::NotesChanged,
        Self::ClipsAdded,
        Self::ClipsRemoved,
        Self::ClipsChanged,
        Self::AnnotationsAdded,
        Self::AnnotationsRemoved,
        Self::AnnotationsChanged,
        Self::KeySignaturesAdded,
        Self::KeySignaturesRemoved,
        Self::KeySignaturesChanged,
        Self::TimeSignaturesAdded,
        Self::TimeSignaturesRemoved,
        Self::TimeSignaturesChanged,
    ];

    /// The schema tag of this delta type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrackPath => "trackPath",
            Self::TrackColour => "trackColour",
            Self::TrackInstrument => "trackInstrument",
            Self::TrackController => "trackController",
            Self::TrackTimeSignature => "trackTimeSignature",
            Self::ProjectTitle => "projectTitle",
            Self::ProjectAuthor => "projectAuthor",
            Self::ProjectDescription => "projectDescription",
            Self::ProjectLicense => "projectLicense",
            Self::AutoEventsAdded => "autoEventsAdded",
            Self::AutoEventsRemoved => "autoEventsRemoved",
            Self::AutoEventsChanged => "autoEventsChanged",
            Self::NotesAdded => "notesAdded",
            Self::NotesRemoved => "notesRemoved",
            Self::NotesChanged => "notesChanged",
            Self::ClipsAdded => "clipsAdded",
            Self::ClipsRemoved => "clipsRemoved",
            Self::ClipsChanged => "clipsChanged",
            Self::AnnotationsAdded => "annotationsAdded",
            Self::AnnotationsRemoved => "annotationsRemoved",
            Self::AnnotationsChanged => "annotationsChanged",
            Self::KeySignaturesAdded => "keySignaturesAdded",
            Self::KeySignaturesRemoved => "keySignaturesRemoved",
            Self::KeySignaturesChanged => "keySignaturesChanged",
            Self::TimeSignaturesAdded => "timeSignaturesAdded",
            Self::TimeSignaturesRemoved => "timeSignaturesRemoved",
            Self::TimeSignaturesChanged => "timeSignaturesChanged",
        }
    }

    /// The family this delta type is reconciled in.
    pub fn family(&self) -> DeltaFamily {
        match self.collection() {
            Some((kind, _)) => DeltaFamily::Collection(kind),
            None => DeltaFamily::Scalar(*self),
        }
    }

    /// For collection types, the record kind and the operation.
    /// `None` for scalar types.
    pub fn collection(&self) -> Option<(CollectionKind, CollectionOp)> {
        use CollectionKind as K;
        use CollectionOp as Op;

        let pair = match self {
            Self::AutoEventsAdded => (K::AutomationEvents, Op::Added),
            Self::AutoEventsRemoved => (K::AutomationEvents, Op::Removed),
            Self::AutoEventsChanged => (K::AutomationEvents, Op::Changed),
            Self::NotesAdded => (K::Notes, Op::Added),
            Self::NotesRemoved => (K::Notes, Op::Removed),
            Self::NotesChanged => (K::Notes, Op::Changed),
            Self::ClipsAdded => (K::Clips, Op::Added),
            Self::ClipsRemoved => (K::Clips, Op::Removed),
            Self::ClipsChanged => (K::Clips, Op::Changed),
            Self::AnnotationsAdded => (K::Annotations, Op::Added),
            Self::AnnotationsRemoved => (K::Annotations, Op::Removed),
            Self::AnnotationsChanged => (K::Annotations, Op::Changed),
            Self::KeySignaturesAdded => (K::KeySignatures, Op::Added),
            Self::KeySignaturesRemoved => (K::KeySignatures, Op::Removed),
            Self::KeySignaturesChanged => (K::KeySignatures, Op::Changed),
            Self::TimeSignaturesAdded => (K::TimeSignatures, Op::Added),
            Self::TimeSignaturesRemoved => (K::TimeSignatures, Op::Removed),
            Self::TimeSignaturesChanged => (K::TimeSignatures, Op::Changed),
            _ => return None,
        };
        Some(pair)
    }

    /// Returns `true` for single-value delta types.
    pub fn is_scalar(&self) -> bool {
        self.collection().is_none()
    }
}

impl fmt::Display for DeltaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeltaType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| TypeError::UnknownDeltaType(s.to_string()))
    }
}

/// The operation a collection delta records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectionOp {
    Added,
    Removed,
    Changed,
}

impl CollectionOp {
    /// Verb used in human-readable descriptions.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }
}

/// A kind of id-keyed record sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectionKind {
    AutomationEvents,
    Notes,
    Clips,
    Annotations,
    KeySignatures,
    TimeSignatures,
}

impl CollectionKind {
    /// The delta type recording `op` on this kind of sequence.
    pub fn delta_type(&self, op: CollectionOp) -> DeltaType {
        use CollectionOp::*;

        match (self, op) {
            (Self::AutomationEvents, Added) => DeltaType::AutoEventsAdded,
            (Self::AutomationEvents, Removed) => DeltaType::AutoEventsRemoved,
            (Self::AutomationEvents, Changed) => DeltaType::AutoEventsChanged,
            (Self::Notes, Added) => DeltaType::NotesAdded,
            (Self::Notes, Removed) => DeltaType::NotesRemoved,
            (Self::Notes, Changed) => DeltaType::NotesChanged,
            (Self::Clips, Added) => DeltaType::ClipsAdded,
            (Self::Clips, Removed) => DeltaType::ClipsRemoved,
            (Self::Clips, Changed) => DeltaType::ClipsChanged,
            (Self::Annotations, Added) => DeltaType::AnnotationsAdded,
            (Self::Annotations, Removed) => DeltaType::AnnotationsRemoved,
            (Self::Annotations, Changed) => DeltaType::AnnotationsChanged,
            (Self::KeySignatures, Added) => DeltaType::KeySignaturesAdded,
            (Self::KeySignatures, Removed) => DeltaType::KeySignaturesRemoved,
            (Self::KeySignatures, Changed) => DeltaType::KeySignaturesChanged,
            (Self::TimeSignatures, Added) => DeltaType::TimeSignaturesAdded,
            (Self::TimeSignatures, Removed) => DeltaType::TimeSignaturesRemoved,
            (Self::TimeSignatures, Changed) => DeltaType::TimeSignaturesChanged,
        }
    }

    /// The snapshot-shaped delta type of this kind (its `Added` op).
    pub fn added(&self) -> DeltaType {
        self.delta_type(CollectionOp::Added)
    }

    /// Plural noun used in human-readable descriptions.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::AutomationEvents => "events",
            Self::Notes => "notes",
            Self::Clips => "clips",
            Self::Annotations => "annotations",
            Self::KeySignatures => "key signatures",
            Self::TimeSignatures => "time signatures",
        }
    }
}

/// A group of delta types that are diffed and merged together.
///
/// Each scalar delta type is a family of its own; the Added/Removed/Changed
/// types of one collection kind share a family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeltaFamily {
    Scalar(DeltaType),
    Collection(CollectionKind),
}

impl DeltaFamily {
    /// Returns `true` if `delta_type` belongs to this family.
    pub fn contains(&self, delta_type: DeltaType) -> bool {
        delta_type.family() == *self
    }

    /// The delta type a merged snapshot uses for this family.
    pub fn snapshot_type(&self) -> DeltaType {
        match self {
            Self::Scalar(t) => *t,
            Self::Collection(kind) => kind.added(),
        }
    }
}

impl fmt::Display for DeltaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(t) => write!(f, "{t}"),
            Self::Collection(kind) => write!(f, "{}", kind.noun()),
        }
    }
}

/// Human-readable description of a delta, with an optional change count.
///
/// The text may contain a `{x}` placeholder which is replaced by the count
/// when displayed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeltaDescription {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_count: Option<i64>,
}

impl DeltaDescription {
    /// Description text used for consolidated deltas of a merged head.
    pub const HEAD_STATE: &'static str = "head state";

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            change_count: None,
        }
    }

    pub fn with_count(text: impl Into<String>, change_count: i64) -> Self {
        Self {
            text: text.into(),
            change_count: Some(change_count),
        }
    }

    pub fn head_state() -> Self {
        Self::new(Self::HEAD_STATE)
    }
}

impl fmt::Display for DeltaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.change_count {
            Some(count) => f.write_str(&self.text.replace("{x}", &count.to_string())),
            None => f.write_str(&self.text),
        }
    }
}

/// An immutable, typed change record. Carries no payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    #[serde(rename = "type")]
    delta_type: DeltaType,
    description: DeltaDescription,
}

impl Delta {
    pub fn new(description: DeltaDescription, delta_type: DeltaType) -> Self {
        Self {
            delta_type,
            description,
        }
    }

    pub fn delta_type(&self) -> DeltaType {
        self.delta_type
    }

    pub fn has_type(&self, delta_type: DeltaType) -> bool {
        self.delta_type == delta_type
    }

    pub fn description(&self) -> &DeltaDescription {
        &self.description
    }

    pub fn family(&self) -> DeltaFamily {
        self.delta_type.family()
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.delta_type, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back_to_the_same_type() {
        for t in DeltaType::ALL {
            assert_eq!(t.as_str().parse::<DeltaType>().unwrap(), t);
        }
    }

    #[test]
    fn serde_tag_matches_schema_tag() {
        for t in DeltaType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "trackVolume".parse::<DeltaType>().unwrap_err();
        assert_eq!(err, TypeError::UnknownDeltaType("trackVolume".into()));
    }

    #[test]
    fn collection_ops_share_a_family() {
        let added = DeltaType::AutoEventsAdded.family();
        assert_eq!(added, DeltaType::AutoEventsRemoved.family());
        assert_eq!(added, DeltaType::AutoEventsChanged.family());
        assert_ne!(added, DeltaType::NotesAdded.family());
        assert_eq!(added, DeltaFamily::Collection(CollectionKind::AutomationEvents));
    }

    #[test]
    fn scalars_are_their_own_family() {
        assert!(DeltaType::TrackPath.is_scalar());
        assert_eq!(
            DeltaType::TrackPath.family(),
            DeltaFamily::Scalar(DeltaType::TrackPath)
        );
        assert_ne!(
            DeltaType::TrackPath.family(),
            DeltaType::TrackColour.family()
        );
    }

    #[test]
    fn kind_and_op_map_back_to_delta_type() {
        for t in DeltaType::ALL {
            if let Some((kind, op)) = t.collection() {
                assert_eq!(kind.delta_type(op), t);
            }
        }
    }

    #[test]
    fn snapshot_type_is_added_op() {
        let family = DeltaFamily::Collection(CollectionKind::Clips);
        assert_eq!(family.snapshot_type(), DeltaType::ClipsAdded);
        assert!(family.contains(DeltaType::ClipsChanged));
        assert!(!family.contains(DeltaType::NotesChanged));
    }

    #[test]
    fn description_substitutes_count() {
        let d = DeltaDescription::with_count("added {x} events", 3);
        assert_eq!(d.to_string(), "added 3 events");

        let plain = DeltaDescription::new("path changed");
        assert_eq!(plain.to_string(), "path changed");
    }

    #[test]
    fn delta_serde_roundtrip() {
        let delta = Delta::new(
            DeltaDescription::with_count("removed {x} notes", 2),
            DeltaType::NotesRemoved,
        );
        let json = serde_json::to_string(&delta).unwrap();
        assert!(json.contains("\"type\":\"notesRemoved\""));
        let parsed: Delta = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, delta);
    }
}
