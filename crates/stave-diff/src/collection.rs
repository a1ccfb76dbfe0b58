//! Identity-based diffing of record collections.
//!
//! Records are matched by id, never by position. Both sides are decoded into
//! [`RecordSet`]s and walked together in id order, so a comparison is a
//! single merge-join over the two sets.

use std::cmp::Ordering;

use stave_model::{Record, RecordSet};
use stave_tree::SerializedTree;
use stave_types::{CollectionOp, DeltaDescription};
use tracing::debug;

use crate::delta_diff::DeltaDiff;

/// The result of comparing two record sets by id.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordChanges<'a, R: Record> {
    /// Records present only on the changes side.
    pub added: Vec<&'a R>,
    /// Records present only on the state side.
    pub removed: Vec<&'a R>,
    /// Changes-side values of records whose tracked fields differ.
    pub changed: Vec<&'a R>,
}

impl<'a, R: Record> Default for RecordChanges<'a, R> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
            changed: Vec::new(),
        }
    }
}

impl<'a, R: Record> RecordChanges<'a, R> {
    /// Returns `true` if the two sets held the same records.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of added, removed and changed records.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    fn group(&self, op: CollectionOp) -> &[&'a R] {
        match op {
            CollectionOp::Added => &self.added,
            CollectionOp::Removed => &self.removed,
            CollectionOp::Changed => &self.changed,
        }
    }
}

/// Compare two record sets by id.
pub fn compare_records<'a, R: Record>(
    state: &'a RecordSet<R>,
    changes: &'a RecordSet<R>,
) -> RecordChanges<'a, R> {
    let mut result = RecordChanges::default();
    let mut old = state.iter().peekable();
    let mut new = changes.iter().peekable();

    loop {
        let order = match (old.peek(), new.peek()) {
            (Some(a), Some(b)) => a.id().cmp(b.id()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => break,
        };

        match order {
            Ordering::Less => {
                if let Some(record) = old.next() {
                    result.removed.push(record);
                }
            }
            Ordering::Greater => {
                if let Some(record) = new.next() {
                    result.added.push(record);
                }
            }
            Ordering::Equal => {
                if let (Some(before), Some(after)) = (old.next(), new.next()) {
                    if after.has_changed_from(before) {
                        result.changed.push(after);
                    }
                }
            }
        }
    }

    result
}

/// Diff two collection payloads of record type `R`.
///
/// Emits up to three deltas, in the order added, removed, changed, and only
/// for non-empty groups. Each payload is tagged with the matching delta type
/// and holds the records of that group in position order.
pub fn create_records_diffs<R: Record>(
    state: Option<&SerializedTree>,
    changes: &SerializedTree,
) -> Vec<DeltaDiff> {
    let before = RecordSet::<R>::from_payload(state);
    let after = RecordSet::<R>::from_payload(Some(changes));
    let result = compare_records(&before, &after);

    debug!(
        kind = R::TAG,
        added = result.added.len(),
        removed = result.removed.len(),
        changed = result.changed.len(),
        "compared record sets"
    );

    [CollectionOp::Added, CollectionOp::Removed, CollectionOp::Changed]
        .into_iter()
        .filter(|op| !result.group(*op).is_empty())
        .map(|op| {
            let records = result.group(op);
            let delta_type = R::KIND.delta_type(op);
            let description = DeltaDescription::with_count(
                format!("{} {{x}} {}", op.verb(), R::KIND.noun()),
                records.len() as i64,
            );
            let payload = stave_model::set::serialize_records(records.iter().copied(), delta_type);
            DeltaDiff::from_parts(delta_type, description, payload)
        })
        .collect()
}
