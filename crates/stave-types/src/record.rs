use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a record inside one sequence.
///
/// Two records are the same record if and only if their ids match, no
/// matter how their position or other fields changed. Ids are opaque short
/// strings; ordering is lexicographic and only used for deterministic
/// lookups, never for placement.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_agree() {
        assert_eq!(RecordId::from(42u64), RecordId::from("42"));
    }

    #[test]
    fn serde_is_transparent() {
        let id = RecordId::new("a1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a1\"");
    }

    #[test]
    fn debug_shows_inner_value() {
        assert_eq!(format!("{:?}", RecordId::new("x")), "RecordId(x)");
    }
}
