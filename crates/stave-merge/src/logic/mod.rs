//! Per-node-kind diff logics.
//!
//! A diff logic is bound to one tracked item. Diffing treats that item as
//! the changes and a prior state as the base; merging treats it as the
//! target and folds it onto a prior state.

mod automation;
mod piano;
mod project_info;
mod timeline;

pub use automation::AutomationTrackDiffLogic;
pub use piano::PianoTrackDiffLogic;
pub use project_info::ProjectInfoDiffLogic;
pub use timeline::ProjectTimelineDiffLogic;

use stave_diff::{Diff, TrackedItem};
use stave_types::NodeKind;

use crate::config::EngineConfig;
use crate::engine::DeltaEngine;

/// The diff and merge strategy of one kind of document node.
pub trait DiffLogic {
    /// The item this logic is bound to.
    fn target(&self) -> &dyn TrackedItem;

    fn engine(&self) -> &DeltaEngine;

    /// Diff `state` against the bound item.
    fn create_diff(&self, state: &dyn TrackedItem) -> Diff {
        self.engine().create_diff(self.target(), state)
    }

    /// Merge the bound item onto `state`.
    fn create_merged_item(&self, state: &dyn TrackedItem) -> Diff {
        self.engine().create_merged_item(self.target(), state)
    }
}

/// The diff logic for `target`, chosen by its identity type.
pub fn logic_for<'a>(target: &'a dyn TrackedItem, config: &EngineConfig) -> Box<dyn DiffLogic + 'a> {
    let config = config.clone();
    match target.identity_type() {
        NodeKind::AutomationTrack => Box::new(AutomationTrackDiffLogic::with_config(target, config)),
        NodeKind::PianoTrack => Box::new(PianoTrackDiffLogic::with_config(target, config)),
        NodeKind::ProjectTimeline => Box::new(ProjectTimelineDiffLogic::with_config(target, config)),
        NodeKind::ProjectInfo => Box::new(ProjectInfoDiffLogic::with_config(target, config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_diff::ItemSnapshot;

    #[test]
    fn factory_picks_logic_by_kind() {
        for kind in NodeKind::ALL {
            let item = ItemSnapshot::new(kind);
            let logic = logic_for(&item, &EngineConfig::default());
            assert_eq!(logic.engine().schema().kind(), kind);
            assert_eq!(logic.target().identity_type(), kind);
        }
    }
}
