use serde::{Deserialize, Serialize};
use stave_types::DeltaDescription;

use crate::error::{MergeError, MergeResult};

/// Configuration for diff logics and the merge engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Description given to consolidated collection deltas and synthesized
    /// deltas of a merged head.
    pub head_state_description: String,
    /// When `false`, families missing from the state are never synthesized
    /// after the main merge pass.
    pub synthesize_missing_families: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            head_state_description: DeltaDescription::HEAD_STATE.to_string(),
            synthesize_missing_families: true,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML string. Missing keys take their
    /// default values.
    pub fn from_toml_str(toml_str: &str) -> MergeResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| MergeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MergeResult<()> {
        if self.head_state_description.trim().is_empty() {
            return Err(MergeError::Config(
                "head_state_description must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn head_state(&self) -> DeltaDescription {
        DeltaDescription::new(self.head_state_description.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = EngineConfig::default();
        assert_eq!(c.head_state_description, "head state");
        assert!(c.synthesize_missing_families);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = EngineConfig::from_toml_str("synthesize_missing_families = false").unwrap();
        assert!(!c.synthesize_missing_families);
        assert_eq!(c.head_state_description, "head state");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(
            EngineConfig::from_toml_str("synthesize_missing_families = \"yes\""),
            Err(MergeError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("head_state_description = \"  \""),
            Err(MergeError::Config(_))
        ));
    }
}
