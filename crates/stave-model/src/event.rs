use stave_tree::{schema, SerializedTree};
use stave_types::{CollectionKind, RecordId};

use crate::record::{read_f64, read_id, record_node, Record};

/// A point on an automation curve.
#[derive(Clone, Debug, PartialEq)]
pub struct AutomationEvent {
    pub id: RecordId,
    pub beat: f64,
    /// Shape of the segment leading to the next event, 0.0..=1.0.
    pub curvature: f64,
    pub controller_value: f64,
}

impl AutomationEvent {
    pub const DEFAULT_CURVATURE: f64 = 0.5;

    pub fn new(id: impl Into<RecordId>, beat: f64, controller_value: f64) -> Self {
        Self {
            id: id.into(),
            beat,
            curvature: Self::DEFAULT_CURVATURE,
            controller_value,
        }
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }
}

impl Record for AutomationEvent {
    const KIND: CollectionKind = CollectionKind::AutomationEvents;
    const TAG: &'static str = schema::AUTOMATION_EVENT;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn beat(&self) -> f64 {
        self.beat
    }

    fn has_changed_from(&self, other: &Self) -> bool {
        self.beat.total_cmp(&other.beat).is_ne()
            || self.curvature.total_cmp(&other.curvature).is_ne()
            || self.controller_value.total_cmp(&other.controller_value).is_ne()
    }

    fn to_tree(&self) -> SerializedTree {
        record_node(Self::TAG, &self.id, self.beat)
            .with_attribute(schema::CURVATURE, self.curvature)
            .with_attribute(schema::CONTROLLER_VALUE, self.controller_value)
    }

    fn from_tree(tree: &SerializedTree) -> Option<Self> {
        if !tree.has_tag(Self::TAG) {
            return None;
        }
        Some(Self {
            id: read_id(tree)?,
            beat: read_f64(tree, schema::BEAT)?,
            curvature: read_f64(tree, schema::CURVATURE).unwrap_or(Self::DEFAULT_CURVATURE),
            controller_value: read_f64(tree, schema::CONTROLLER_VALUE).unwrap_or_default(),
        })
    }
}
