//! Which delta families each kind of document node supports.

use stave_types::{CollectionKind, DeltaFamily, DeltaType, NodeKind};

/// One family a node kind supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FamilySpec {
    pub family: DeltaFamily,
    /// A required family is synthesized into every merged head whose state
    /// lacks it, even if the target never mentions it.
    pub required: bool,
}

impl FamilySpec {
    pub fn optional(family: DeltaFamily) -> Self {
        Self {
            family,
            required: false,
        }
    }

    pub fn required(family: DeltaFamily) -> Self {
        Self {
            family,
            required: true,
        }
    }
}

/// The ordered families of one node kind.
///
/// Delta types outside the schema are unknown to the node's diff logic:
/// they are skipped when diffing and copied forward when merging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSchema {
    kind: NodeKind,
    families: Vec<FamilySpec>,
}

impl NodeSchema {
    pub fn new(kind: NodeKind, families: Vec<FamilySpec>) -> Self {
        Self { kind, families }
    }

    /// The schema of a built-in node kind.
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::AutomationTrack => Self::automation_track(),
            NodeKind::PianoTrack => Self::piano_track(),
            NodeKind::ProjectTimeline => Self::project_timeline(),
            NodeKind::ProjectInfo => Self::project_info(),
        }
    }

    pub fn automation_track() -> Self {
        Self::new(
            NodeKind::AutomationTrack,
            vec![
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::TrackPath)),
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::TrackColour)),
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::TrackInstrument)),
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::TrackController)),
                FamilySpec::optional(DeltaFamily::Collection(CollectionKind::AutomationEvents)),
                FamilySpec::required(DeltaFamily::Scalar(DeltaType::TrackTimeSignature)),
                FamilySpec::required(DeltaFamily::Collection(CollectionKind::Clips)),
            ],
        )
    }

    pub fn piano_track() -> Self {
        Self::new(
            NodeKind::PianoTrack,
            vec![
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::TrackPath)),
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::TrackColour)),
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::TrackInstrument)),
                FamilySpec::optional(DeltaFamily::Collection(CollectionKind::Notes)),
                FamilySpec::required(DeltaFamily::Scalar(DeltaType::TrackTimeSignature)),
                FamilySpec::required(DeltaFamily::Collection(CollectionKind::Clips)),
            ],
        )
    }

    pub fn project_timeline() -> Self {
        Self::new(
            NodeKind::ProjectTimeline,
            vec![
                FamilySpec::optional(DeltaFamily::Collection(CollectionKind::Annotations)),
                FamilySpec::optional(DeltaFamily::Collection(CollectionKind::KeySignatures)),
                FamilySpec::optional(DeltaFamily::Collection(CollectionKind::TimeSignatures)),
            ],
        )
    }

    pub fn project_info() -> Self {
        Self::new(
            NodeKind::ProjectInfo,
            vec![
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::ProjectTitle)),
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::ProjectAuthor)),
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::ProjectDescription)),
                FamilySpec::optional(DeltaFamily::Scalar(DeltaType::ProjectLicense)),
            ],
        )
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn families(&self) -> &[FamilySpec] {
        &self.families
    }

    pub fn recognizes(&self, family: DeltaFamily) -> bool {
        self.families.iter().any(|spec| spec.family == family)
    }
}
