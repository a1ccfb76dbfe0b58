//! The table mapping each delta family to its diff and merge functions.

use std::collections::BTreeMap;

use stave_diff::collection::create_records_diffs;
use stave_diff::scalar::{self as scalar_diff, ScalarDiffFn};
use stave_diff::DeltaDiff;
use stave_model::{Annotation, AutomationEvent, Clip, KeySignature, Note, Record, TimeSignature};
use stave_tree::SerializedTree;
use stave_types::{CollectionKind, CollectionOp, DeltaFamily, DeltaType};

use crate::collection::{
    merge_records_added, merge_records_changed, merge_records_removed, CollectionMergeFn,
};
use crate::scalar::{self as scalar_merge, ScalarMergeFn};

/// Diff function of a collection kind: `(state, changes)` Added payloads to
/// up to three delta diffs.
pub type CollectionDiffFn = fn(Option<&SerializedTree>, &SerializedTree) -> Vec<DeltaDiff>;

/// Diff and merge functions of one record collection kind.
#[derive(Clone, Copy, Debug)]
pub struct CollectionHandler {
    pub kind: CollectionKind,
    pub diff: CollectionDiffFn,
    pub added: CollectionMergeFn,
    pub removed: CollectionMergeFn,
    pub changed: CollectionMergeFn,
}

impl CollectionHandler {
    /// The handler for record type `R`.
    pub fn of<R: Record>() -> Self {
        Self {
            kind: R::KIND,
            diff: create_records_diffs::<R>,
            added: merge_records_added::<R>,
            removed: merge_records_removed::<R>,
            changed: merge_records_changed::<R>,
        }
    }

    /// The merge function applying `op`.
    pub fn merge_fn(&self, op: CollectionOp) -> CollectionMergeFn {
        match op {
            CollectionOp::Added => self.added,
            CollectionOp::Removed => self.removed,
            CollectionOp::Changed => self.changed,
        }
    }
}

/// How a family is diffed and merged.
#[derive(Clone, Copy, Debug)]
pub enum DeltaHandler {
    Scalar {
        diff: ScalarDiffFn,
        merge: ScalarMergeFn,
    },
    Collection(CollectionHandler),
}

/// The handler of every family in the closed delta type set.
pub fn standard_handler(family: DeltaFamily) -> DeltaHandler {
    let scalar = |diff: ScalarDiffFn, merge: ScalarMergeFn| DeltaHandler::Scalar { diff, merge };

    match family {
        DeltaFamily::Scalar(delta_type) => match delta_type {
            DeltaType::TrackPath => scalar(scalar_diff::create_path_diff, scalar_merge::merge_path),
            DeltaType::TrackColour => {
                scalar(scalar_diff::create_colour_diff, scalar_merge::merge_colour)
            }
            DeltaType::TrackInstrument => {
                scalar(scalar_diff::create_instrument_diff, scalar_merge::merge_instrument)
            }
            DeltaType::TrackController => {
                scalar(scalar_diff::create_controller_diff, scalar_merge::merge_controller)
            }
            DeltaType::TrackTimeSignature => scalar(
                scalar_diff::create_time_signature_diff,
                scalar_merge::merge_time_signature,
            ),
            DeltaType::ProjectTitle => {
                scalar(scalar_diff::create_title_diff, scalar_merge::merge_title)
            }
            DeltaType::ProjectAuthor => {
                scalar(scalar_diff::create_author_diff, scalar_merge::merge_author)
            }
            DeltaType::ProjectDescription => {
                scalar(scalar_diff::create_description_diff, scalar_merge::merge_description)
            }
            DeltaType::ProjectLicense => {
                scalar(scalar_diff::create_license_diff, scalar_merge::merge_license)
            }
            DeltaType::AutoEventsAdded
            | DeltaType::AutoEventsRemoved
            | DeltaType::AutoEventsChanged => collection_handler(CollectionKind::AutomationEvents),
            DeltaType::NotesAdded | DeltaType::NotesRemoved | DeltaType::NotesChanged => {
                collection_handler(CollectionKind::Notes)
            }
            DeltaType::ClipsAdded | DeltaType::ClipsRemoved | DeltaType::ClipsChanged => {
                collection_handler(CollectionKind::Clips)
            }
            DeltaType::AnnotationsAdded
            | DeltaType::AnnotationsRemoved
            | DeltaType::AnnotationsChanged => collection_handler(CollectionKind::Annotations),
            DeltaType::KeySignaturesAdded
            | DeltaType::KeySignaturesRemoved
            | DeltaType::KeySignaturesChanged => collection_handler(CollectionKind::KeySignatures),
            DeltaType::TimeSignaturesAdded
            | DeltaType::TimeSignaturesRemoved
            | DeltaType::TimeSignaturesChanged => {
                collection_handler(CollectionKind::TimeSignatures)
            }
        },
        DeltaFamily::Collection(kind) => collection_handler(kind),
    }
}

fn collection_handler(kind: CollectionKind) -> DeltaHandler {
    DeltaHandler::Collection(match kind {
        CollectionKind::AutomationEvents => CollectionHandler::of::<AutomationEvent>(),
        CollectionKind::Notes => CollectionHandler::of::<Note>(),
        CollectionKind::Clips => CollectionHandler::of::<Clip>(),
        CollectionKind::Annotations => CollectionHandler::of::<Annotation>(),
        CollectionKind::KeySignatures => CollectionHandler::of::<KeySignature>(),
        CollectionKind::TimeSignatures => CollectionHandler::of::<TimeSignature>(),
    })
}

/// Family to handler lookup used by the merge engine.
#[derive(Clone, Debug, Default)]
pub struct DeltaRegistry {
    handlers: BTreeMap<DeltaFamily, DeltaHandler>,
}

impl DeltaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`standard_handler`] for every family.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for delta_type in DeltaType::ALL {
            let family = delta_type.family();
            if !registry.contains(family) {
                registry.register(family, standard_handler(family));
            }
        }
        registry
    }

    /// Register or replace the handler of `family`.
    pub fn register(&mut self, family: DeltaFamily, handler: DeltaHandler) {
        self.handlers.insert(family, handler);
    }

    pub fn contains(&self, family: DeltaFamily) -> bool {
        self.handlers.contains_key(&family)
    }

    pub fn get(&self, family: DeltaFamily) -> Option<&DeltaHandler> {
        self.handlers.get(&family)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_every_type() {
        let registry = DeltaRegistry::standard();
        for delta_type in DeltaType::ALL {
            assert!(registry.contains(delta_type.family()), "{delta_type} unregistered");
        }
        // Nine scalars and six collection kinds.
        assert_eq!(registry.len(), 15);
    }

    #[test]
    fn handler_shape_follows_family() {
        let registry = DeltaRegistry::standard();
        assert!(matches!(
            registry.get(DeltaType::TrackPath.family()),
            Some(DeltaHandler::Scalar { .. })
        ));
        match registry.get(DeltaType::NotesRemoved.family()) {
            Some(DeltaHandler::Collection(handler)) => assert_eq!(handler.kind, CollectionKind::Notes),
            other => panic!("unexpected handler {other:?}"),
        }
    }

    #[test]
    fn merge_fn_dispatches_by_op() {
        let handler = CollectionHandler::of::<Clip>();
        let state = stave_model::set::serialize_records(&[Clip::new("a", 0.0)], DeltaType::ClipsAdded);
        let merged = (handler.merge_fn(CollectionOp::Removed))(Some(&state), &state);
        assert!(merged.is_empty());
        let merged = (handler.merge_fn(CollectionOp::Added))(None, &state);
        assert_eq!(merged, state);
    }
}
