use serde::{Deserialize, Serialize};
use stave_tree::SerializedTree;
use stave_types::{Delta, DeltaDescription, DeltaType};

use crate::error::{DiffError, DiffResult};

/// A delta paired with its payload: the atomic unit produced by diffing and
/// consumed by merging.
///
/// The payload is owned; it is always a copy and never aliases the tree it
/// was produced from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeltaDiff {
    pub delta: Delta,
    pub payload: SerializedTree,
}

impl DeltaDiff {
    pub fn new(delta: Delta, payload: SerializedTree) -> Self {
        Self { delta, payload }
    }

    /// Build from parts.
    pub fn from_parts(
        delta_type: DeltaType,
        description: DeltaDescription,
        payload: SerializedTree,
    ) -> Self {
        Self::new(Delta::new(description, delta_type), payload)
    }

    pub fn delta_type(&self) -> DeltaType {
        self.delta.delta_type()
    }

    /// Returns `true` if the payload root carries the delta type's tag.
    pub fn is_consistent(&self) -> bool {
        self.payload.has_tag(self.delta_type().as_str())
    }

    pub(crate) fn validate(&self) -> DiffResult<()> {
        if self.is_consistent() {
            Ok(())
        } else {
            Err(DiffError::PayloadTagMismatch {
                delta_type: self.delta_type(),
                tag: self.payload.tag().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistency_follows_payload_tag() {
        let ok = DeltaDiff::from_parts(
            DeltaType::TrackPath,
            DeltaDescription::new("path changed"),
            SerializedTree::new("trackPath"),
        );
        assert!(ok.is_consistent());
        assert!(ok.validate().is_ok());

        let bad = DeltaDiff::from_parts(
            DeltaType::TrackPath,
            DeltaDescription::new("path changed"),
            SerializedTree::new("trackColour"),
        );
        assert!(!bad.is_consistent());
        assert!(matches!(
            bad.validate(),
            Err(DiffError::PayloadTagMismatch { .. })
        ));
    }
}
