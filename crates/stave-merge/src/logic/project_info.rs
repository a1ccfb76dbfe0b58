use stave_diff::TrackedItem;

use crate::config::EngineConfig;
use crate::engine::DeltaEngine;
use crate::logic::DiffLogic;
use crate::schema::NodeSchema;

/// Diff logic of project metadata. Every field is a last-write-wins scalar.
pub struct ProjectInfoDiffLogic<'a> {
    target: &'a dyn TrackedItem,
    engine: DeltaEngine,
}

impl<'a> ProjectInfoDiffLogic<'a> {
    pub fn new(target: &'a dyn TrackedItem) -> Self {
        Self::with_config(target, EngineConfig::default())
    }

    pub fn with_config(target: &'a dyn TrackedItem, config: EngineConfig) -> Self {
        Self {
            target,
            engine: DeltaEngine::new(NodeSchema::project_info(), config),
        }
    }
}

impl DiffLogic for ProjectInfoDiffLogic<'_> {
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
    use stave_model::scalar::{project_text, read_text};
    use stave_types::{DeltaType, NodeKind};

    fn info(title: &str, author: &str) -> ItemSnapshot {
        ItemSnapshot::new(NodeKind::ProjectInfo)
            .with_payload(DeltaType::ProjectTitle, project_text(DeltaType::ProjectTitle, title))
            .with_payload(DeltaType::ProjectAuthor, project_text(DeltaType::ProjectAuthor, author))
    }

    #[test]
    fn only_changed_fields_are_diffed() {
        let state = info("Etude", "Ada");
        let changes = info("Etude No. 2", "Ada");
        let diff = ProjectInfoDiffLogic::new(&changes).create_diff(&state);
        assert_eq!(diff.delta_types(), vec![DeltaType::ProjectTitle]);
        assert_eq!(diff.iter().next().map(|d| d.delta.description().text.as_str()), Some("title changed"));
    }

    #[test]
    fn merged_head_takes_latest_values() {
        let state = info("Etude", "Ada");
        let changes = info("Etude No. 2", "Ada")
            .with_payload(DeltaType::ProjectLicense, project_text(DeltaType::ProjectLicense, "CC0"));

        let diff = ProjectInfoDiffLogic::new(&changes).create_diff(&state);
        let merged = ProjectInfoDiffLogic::new(&diff).create_merged_item(&state);
        let text = |t: DeltaType| merged.get(t).and_then(|d| read_text(&d.payload)).map(str::to_string);

        assert_eq!(text(DeltaType::ProjectTitle).as_deref(), Some("Etude No. 2"));
        assert_eq!(text(DeltaType::ProjectAuthor).as_deref(), Some("Ada"));
        assert_eq!(text(DeltaType::ProjectLicense).as_deref(), Some("CC0"));
        assert!(merged.get(DeltaType::ProjectDescription).is_none());
    }
}
