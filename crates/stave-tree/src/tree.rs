use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// A primitive attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Integer view; floats are accepted only when they are whole numbers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(x) if x.fract() == 0.0 => Some(*x as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Value equality that treats `Int(1)` and `Float(1.0)` as the same.
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                self.as_f64() == other.as_f64()
            }
            _ => self == other,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for AttributeValue {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for AttributeValue {
    fn from(v: f32) -> Self {
        Self::Float(v.into())
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// An ordered tree of named nodes.
///
/// A node has a tag, primitive attributes keyed by name, and ordered
/// children. A node with neither attributes nor children is *empty*; an empty
/// payload is the default value of every delta type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedTree {
    tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<SerializedTree>,
}

impl SerializedTree {
    /// Create an empty node with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Returns `true` if the node has no attributes and no children.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    // ---- Attributes ----

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttributeValue::as_str)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.attribute(name).and_then(AttributeValue::as_f64)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.attribute(name).and_then(AttributeValue::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.attribute(name).and_then(AttributeValue::as_bool)
    }

    // ---- Children ----

    pub fn append_child(&mut self, child: SerializedTree) {
        self.children.push(child);
    }

    pub fn with_child(mut self, child: SerializedTree) -> Self {
        self.append_child(child);
        self
    }

    pub fn children(&self) -> &[SerializedTree] {
        &self.children
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Iterate over the children carrying `tag`, in order.
    pub fn children_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a SerializedTree> + 'a {
        self.children.iter().filter(move |c| c.has_tag(tag))
    }

    /// The first child carrying `tag`.
    pub fn child_with_tag(&self, tag: &str) -> Option<&SerializedTree> {
        self.children.iter().find(|c| c.has_tag(tag))
    }

    // ---- Comparison ----

    /// Structural equivalence: same tag, same attribute set (numeric values
    /// compared by value), and pairwise-equivalent children in the same order.
    pub fn is_equivalent_to(&self, other: &SerializedTree) -> bool {
        self.tag == other.tag
            && self.attributes.len() == other.attributes.len()
            && self.attributes.iter().all(|(name, value)| {
                other
                    .attributes
                    .get(name)
                    .is_some_and(|v| v.is_equivalent_to(value))
            })
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.is_equivalent_to(b))
    }

    // ---- Encoding ----

    pub fn to_json(&self) -> TreeResult<String> {
        serde_json::to_string(self).map_err(|e| TreeError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> TreeResult<Self> {
        serde_json::from_str(json).map_err(|e| TreeError::Serialization(e.to_string()))
    }

    /// Decode and check the root tag.
    pub fn from_json_tagged(json: &str, expected: &str) -> TreeResult<Self> {
        let tree = Self::from_json(json)?;
        if !tree.has_tag(expected) {
            return Err(TreeError::UnexpectedTag {
                expected: expected.to_string(),
                actual: tree.tag,
            });
        }
        Ok(tree)
    }
}
