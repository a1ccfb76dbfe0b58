use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identity type of a versionable document node.
///
/// Each kind has its own diff logic and its own set of supported delta
/// families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// A track of automation events driving one controller.
    AutomationTrack,
    /// A track of piano-roll notes.
    PianoTrack,
    /// The project timeline: annotations, key and time signatures.
    ProjectTimeline,
    /// Project metadata: title, author, description, license.
    ProjectInfo,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        Self::AutomationTrack,
        Self::PianoTrack,
        Self::ProjectTimeline,
        Self::ProjectInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutomationTrack => "automationTrack",
            Self::PianoTrack => "pianoTrack",
            Self::ProjectTimeline => "projectTimeline",
            Self::ProjectInfo => "projectInfo",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| TypeError::UnknownNodeKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_kinds() {
        assert_eq!("pianoTrack".parse::<NodeKind>().unwrap(), NodeKind::PianoTrack);
        assert_eq!(
            "automationTrack".parse::<NodeKind>().unwrap(),
            NodeKind::AutomationTrack
        );
    }

    #[test]
    fn parse_unknown_kind_fails() {
        assert!(matches!(
            "videoTrack".parse::<NodeKind>(),
            Err(TypeError::UnknownNodeKind(_))
        ));
    }

    #[test]
    fn serde_uses_schema_tag() {
        let json = serde_json::to_string(&NodeKind::ProjectTimeline).unwrap();
        assert_eq!(json, "\"projectTimeline\"");
    }
}
