//! Id-keyed record arena.
//!
//! A [`RecordSet`] holds the records of one sequence indexed by id. Diff and
//! merge primitives work on sets as key operations instead of nested scans;
//! serialization orders records by `(beat, id)` so equal sets always produce
//! identical payloads.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use stave_tree::SerializedTree;
use stave_types::{DeltaType, RecordId};
use tracing::warn;

use crate::record::Record;

/// The records of one sequence, keyed by id.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSet<R: Record> {
    records: BTreeMap<RecordId, R>,
}

impl<R: Record> Default for RecordSet<R> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<R: Record> RecordSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the records of a collection payload.
    ///
    /// An absent payload is an empty sequence. Child nodes of other tags are
    /// ignored, malformed record nodes are skipped, and when an id repeats the
    /// first record wins.
    pub fn from_payload(payload: Option<&SerializedTree>) -> Self {
        let mut set = Self::new();
        let Some(payload) = payload else {
            return set;
        };

        for node in payload.children_with_tag(R::TAG) {
            match R::from_tree(node) {
                Some(record) => {
                    let id = record.id().clone();
                    if !set.insert_if_absent(record) {
                        warn!(tag = R::TAG, id = %id, "duplicate record id in payload; keeping first");
                    }
                }
                None => {
                    warn!(tag = R::TAG, payload = payload.tag(), "skipping malformed record");
                }
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.get(id)
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.records.keys()
    }

    /// Insert unless a record with the same id exists. Returns `true` if inserted.
    pub fn insert_if_absent(&mut self, record: R) -> bool {
        match self.records.entry(record.id().clone()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<R> {
        self.records.remove(id)
    }

    /// Replace the record with the same id. Returns `false`, leaving the set
    /// untouched, if no such record exists.
    pub fn replace(&mut self, record: R) -> bool {
        match self.records.get_mut(record.id()) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => false,
        }
    }

    /// Records in serialization order: by beat, then by id.
    pub fn sorted(&self) -> Vec<&R> {
        sorted_by_position(self.records.values())
    }

    /// Serialize the set as a payload tagged with `delta_type`.
    pub fn to_payload(&self, delta_type: DeltaType) -> SerializedTree {
        serialize_records(self.records.values(), delta_type)
    }
}

impl<R: Record> FromIterator<R> for RecordSet<R> {
    /// Collect records; the first record of a repeated id wins.
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.insert_if_absent(record);
        }
        set
    }
}

/// Order records by beat, breaking ties by id.
pub fn compare_position<R: Record>(a: &R, b: &R) -> Ordering {
    a.beat().total_cmp(&b.beat()).then_with(|| a.id().cmp(b.id()))
}

pub fn sorted_by_position<'a, R: Record + 'a>(records: impl IntoIterator<Item = &'a R>) -> Vec<&'a R> {
    let mut sorted: Vec<&R> = records.into_iter().collect();
    sorted.sort_by(|a, b| compare_position(*a, *b));
    sorted
}

/// Serialize records, in position order, under a payload node tagged with
/// `delta_type`.
pub fn serialize_records<'a, R: Record + 'a>(
    records: impl IntoIterator<Item = &'a R>,
    delta_type: DeltaType,
) -> SerializedTree {
    let mut tree = SerializedTree::new(delta_type.as_str());
    for record in sorted_by_position(records) {
        tree.append_child(record.to_tree());
    }
    tree
}
