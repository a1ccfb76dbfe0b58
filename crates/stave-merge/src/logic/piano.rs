use stave_diff::TrackedItem;

use crate::config::EngineConfig;
use crate::engine::DeltaEngine;
use crate::logic::DiffLogic;
use crate::schema::NodeSchema;

/// Diff logic of piano-roll tracks: path, colour, instrument and notes, plus
/// the time signature and clips shared by every track kind.
pub struct PianoTrackDiffLogic<'a> {
    target: &'a dyn TrackedItem,
    engine: DeltaEngine,
}

impl<'a> PianoTrackDiffLogic<'a> {
    pub fn new(target: &'a dyn TrackedItem) -> Self {
        Self::with_config(target, EngineConfig::default())
    }

    pub fn with_config(target: &'a dyn TrackedItem, config: EngineConfig) -> Self {
        Self {
            target,
            engine: DeltaEngine::new(NodeSchema::piano_track(), config),
        }
    }
}

impl DiffLogic for PianoTrackDiffLogic<'_> {
    fn target(&self) -> &dyn TrackedItem {
        self.target
    }

    fn engine(&self) -> &DeltaEngine {
        &self.engine
    }
}
