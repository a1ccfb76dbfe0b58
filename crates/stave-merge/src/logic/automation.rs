use stave_diff::TrackedItem;

use crate::config::EngineConfig;
use crate::engine::DeltaEngine;
use crate::logic::DiffLogic;
use crate::schema::NodeSchema;

/// Diff logic of automation tracks.
///
/// Handles the track path, colour, instrument and controller, the automation
/// event sequence, and the time signature and clips every track carries.
/// Histories recorded before a track had a time signature or clips get both
/// synthesized on merge.
pub struct AutomationTrackDiffLogic<'a> {
    target: &'a dyn TrackedItem,
    engine: DeltaEngine,
}

impl<'a> AutomationTrackDiffLogic<'a> {
    pub fn new(target: &'a dyn TrackedItem) -> Self {
        Self::with_config(target, EngineConfig::default())
    }

    pub fn with_config(target: &'a dyn TrackedItem, config: EngineConfig) -> Self {
        Self {
            target,
            engine: DeltaEngine::new(NodeSchema::automation_track(), config),
        }
    }
}

impl DiffLogic for AutomationTrackDiffLogic<'_> {
    fn target(&self) -> &dyn TrackedItem {
        self.target
    }

    fn engine(&self) -> &DeltaEngine {
        &self.engine
    }
}
