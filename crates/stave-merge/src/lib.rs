//! Merge engine for Stave.
//!
//! Reconciles independently edited copies of a document node with a
//! type-aware three-way merge: scalar properties are last-write-wins, record
//! collections are reconciled by identity, and delta families an older
//! history never recorded are synthesized on merge.
//!
//! # Key Types
//!
//! - [`DiffLogic`] -- Per-node-kind diff and merge strategy, bound to one item
//! - [`DeltaEngine`] -- Schema-driven engine shared by every diff logic
//! - [`NodeSchema`] -- Families a node kind supports, required or optional
//! - [`DeltaRegistry`] -- Family to diff/merge handler table
//! - [`EngineConfig`] -- Head-state description and synthesis switch

pub mod collection;
pub mod config;
pub mod engine;
pub mod error;
pub mod logic;
pub mod registry;
pub mod scalar;
pub mod schema;

pub use config::EngineConfig;
pub use engine::DeltaEngine;
pub use error::{MergeError, MergeResult};
pub use logic::{
    logic_for, AutomationTrackDiffLogic, DiffLogic, PianoTrackDiffLogic, ProjectInfoDiffLogic,
    ProjectTimelineDiffLogic,
};
pub use registry::{CollectionHandler, DeltaHandler, DeltaRegistry};
pub use schema::{FamilySpec, NodeSchema};

use stave_diff::{Diff, TrackedItem};
use tracing::debug;

fn check_kinds(state: &dyn TrackedItem, other: &dyn TrackedItem) -> MergeResult<()> {
    let expected = state.identity_type();
    let actual = other.identity_type();
    if expected != actual {
        return Err(MergeError::KindMismatch { expected, actual });
    }
    Ok(())
}

/// Diff `state` against `changes`, both of the same node kind.
pub fn diff_items(
    state: &dyn TrackedItem,
    changes: &dyn TrackedItem,
    config: &EngineConfig,
) -> MergeResult<Diff> {
    check_kinds(state, changes)?;
    debug!(kind = %state.identity_type(), "diffing items");
    Ok(logic_for(changes, config).create_diff(state))
}

/// Merge `target` onto `state`, both of the same node kind.
pub fn merge_items(
    state: &dyn TrackedItem,
    target: &dyn TrackedItem,
    config: &EngineConfig,
) -> MergeResult<Diff> {
    check_kinds(state, target)?;
    debug!(kind = %state.identity_type(), "merging items");
    Ok(logic_for(target, config).create_merged_item(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_diff::ItemSnapshot;
    use stave_model::scalar;
    use stave_types::{DeltaType, NodeKind};

    #[test]
    fn mismatched_kinds_are_rejected() {
        let state = ItemSnapshot::new(NodeKind::PianoTrack);
        let changes = ItemSnapshot::new(NodeKind::ProjectInfo);
        let err = diff_items(&state, &changes, &EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            MergeError::KindMismatch {
                expected: NodeKind::PianoTrack,
                actual: NodeKind::ProjectInfo
            }
        ));
        assert!(merge_items(&state, &changes, &EngineConfig::default()).is_err());
    }

    #[test]
    fn scalar_last_write_wins_end_to_end() {
        let state = ItemSnapshot::new(NodeKind::PianoTrack)
            .with_payload(DeltaType::TrackPath, scalar::track_path("A"));
        let changes = ItemSnapshot::new(NodeKind::PianoTrack)
            .with_payload(DeltaType::TrackPath, scalar::track_path("B"));
        let config = EngineConfig::default();

        let diff = diff_items(&state, &changes, &config).unwrap();
        let merged = merge_items(&state, &diff, &config).unwrap().into_snapshot();
        assert_eq!(
            merged.payload(DeltaType::TrackPath).and_then(scalar::read_path),
            Some("B")
        );
    }
}
