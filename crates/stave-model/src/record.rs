use std::fmt;

use stave_tree::{schema, AttributeValue, SerializedTree};
use stave_types::{CollectionKind, RecordId};

/// An id-keyed entity stored in a collection payload.
///
/// Identity is the merge key: two records with the same [`Record::id`] are
/// the same record, whatever happened to their other fields.
pub trait Record: Clone + fmt::Debug + PartialEq {
    /// The collection this record type lives in.
    const KIND: CollectionKind;

    /// Tag of the record's tree node.
    const TAG: &'static str;

    fn id(&self) -> &RecordId;

    /// Position used to order records when serializing a sequence.
    fn beat(&self) -> f64;

    /// Returns `true` if any tracked field differs from `other`.
    fn has_changed_from(&self, other: &Self) -> bool;

    fn to_tree(&self) -> SerializedTree;

    /// Decode a record node. Returns `None` if the node is not a record of
    /// this type or lacks its identity or position.
    fn from_tree(tree: &SerializedTree) -> Option<Self>;
}

/// Read the identity attribute. Integer ids are accepted and stringified.
pub(crate) fn read_id(tree: &SerializedTree) -> Option<RecordId> {
    match tree.attribute(schema::ID)? {
        AttributeValue::Text(s) if !s.is_empty() => Some(RecordId::new(s.clone())),
        AttributeValue::Int(n) => Some(RecordId::new(n.to_string())),
        _ => None,
    }
}

pub(crate) fn read_f64(tree: &SerializedTree, name: &str) -> Option<f64> {
    tree.get_f64(name)
}

pub(crate) fn read_i32(tree: &SerializedTree, name: &str) -> Option<i32> {
    tree.get_i64(name).and_then(|v| i32::try_from(v).ok())
}

/// Header shared by every record node: tag, id and beat.
pub(crate) fn record_node(tag: &str, id: &RecordId, beat: f64) -> SerializedTree {
    SerializedTree::new(tag)
        .with_attribute(schema::ID, id.as_str())
        .with_attribute(schema::BEAT, beat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ids_are_accepted() {
        let tree = SerializedTree::new("event").with_attribute(schema::ID, 7i64);
        assert_eq!(read_id(&tree), Some(RecordId::from("7")));
    }

    #[test]
    fn empty_or_missing_ids_are_rejected() {
        assert_eq!(read_id(&SerializedTree::new("event")), None);
        let empty = SerializedTree::new("event").with_attribute(schema::ID, "");
        assert_eq!(read_id(&empty), None);
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        let tree = SerializedTree::new("note").with_attribute(schema::KEY, i64::MAX);
        assert_eq!(read_i32(&tree, schema::KEY), None);
    }
}
