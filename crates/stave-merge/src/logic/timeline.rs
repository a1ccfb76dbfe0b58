use stave_diff::TrackedItem;

use crate::config::EngineConfig;
use crate::engine::DeltaEngine;
use crate::logic::DiffLogic;
use crate::schema::NodeSchema;

/// Diff logic of the project timeline: annotations, key signatures and
/// time signatures, each an id-keyed marker sequence.
pub struct ProjectTimelineDiffLogic<'a> {
    target: &'a dyn TrackedItem,
    engine: DeltaEngine,
}

impl<'a> ProjectTimelineDiffLogic<'a> {
    pub fn new(target: &'a dyn TrackedItem) -> Self {
        Self::with_config(target, EngineConfig::default())
    }

    pub fn with_config(target: &'a dyn TrackedItem, config: EngineConfig) -> Self {
        Self {
            target,
            engine: DeltaEngine::new(NodeSchema::project_timeline(), config),
        }
    }
}

impl DiffLogic for ProjectTimelineDiffLogic<'_> {
    fn target(&self) -> &dyn TrackedItem {
        self.target
    }

    fn engine(&self) -> &DeltaEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_diff::ItemSnapshot;
    use stave_model::set::serialize_records;
    use stave_model::{Annotation, KeySignature, RecordSet, TimeSignature};
    use stave_types::{DeltaType, NodeKind};

    #[test]
    fn markers_merge_per_family() {
        let state = ItemSnapshot::new(NodeKind::ProjectTimeline)
            .with_payload(
                DeltaType::AnnotationsAdded,
                serialize_records(&[Annotation::new("intro", 0.0, "Intro")], DeltaType::AnnotationsAdded),
            )
            .with_payload(
                DeltaType::KeySignaturesAdded,
                serialize_records(&[KeySignature::new("k0", 0.0, 0, "major")], DeltaType::KeySignaturesAdded),
            );
        let changes = ItemSnapshot::new(NodeKind::ProjectTimeline)
            .with_payload(
                DeltaType::AnnotationsAdded,
                serialize_records(
                    &[Annotation::new("intro", 0.0, "Intro"), Annotation::new("verse", 16.0, "Verse")],
                    DeltaType::AnnotationsAdded,
                ),
            )
            .with_payload(
                DeltaType::KeySignaturesAdded,
                serialize_records(&[KeySignature::new("k0", 0.0, 0, "major")], DeltaType::KeySignaturesAdded),
            );

        let diff = ProjectTimelineDiffLogic::new(&changes).create_diff(&state);
        assert_eq!(diff.delta_types(), vec![DeltaType::AnnotationsAdded]);

        let merged = ProjectTimelineDiffLogic::new(&diff).create_merged_item(&state);
        let annotations = RecordSet::<Annotation>::from_payload(
            merged.get(DeltaType::AnnotationsAdded).map(|d| &d.payload),
        );
        assert_eq!(annotations.len(), 2);
        assert!(merged.get(DeltaType::KeySignaturesAdded).is_some());
        // Optional families are not synthesized without a contribution.
        assert!(merged.get(DeltaType::TimeSignaturesAdded).is_none());
    }

    #[test]
    fn new_time_signature_family_is_synthesized_from_target() {
        let state = ItemSnapshot::new(NodeKind::ProjectTimeline);
        let changes = ItemSnapshot::new(NodeKind::ProjectTimeline).with_payload(
            DeltaType::TimeSignaturesAdded,
            serialize_records(&[TimeSignature::new("t0", 0.0, 6, 8)], DeltaType::TimeSignaturesAdded),
        );

        let diff = ProjectTimelineDiffLogic::new(&changes).create_diff(&state);
        let merged = ProjectTimelineDiffLogic::new(&diff).create_merged_item(&state);
        let signatures = RecordSet::<TimeSignature>::from_payload(
            merged.get(DeltaType::TimeSignaturesAdded).map(|d| &d.payload),
        );
        assert_eq!(signatures.get(&"t0".into()).map(|t| (t.numerator, t.denominator)), Some((6, 8)));
    }
}
