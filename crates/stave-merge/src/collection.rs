//! Identity-based merge of record collections.
//!
//! Every merge decodes both payloads into [`RecordSet`]s, applies the
//! operation by id, and re-serializes the result as the kind's `Added`
//! payload, which is the snapshot shape of a collection.

use stave_model::{Record, RecordSet};
use stave_tree::SerializedTree;
use tracing::debug;

/// Signature shared by all collection merge functions: `(state, changes)`.
pub type CollectionMergeFn = fn(Option<&SerializedTree>, &SerializedTree) -> SerializedTree;

/// Add the records of `changes` whose id is not yet in `set`.
///
/// On an id collision the record already in `set` is kept.
pub fn apply_added<R: Record>(set: &mut RecordSet<R>, changes: &RecordSet<R>) {
    for record in changes.iter() {
        set.insert_if_absent(record.clone());
    }
}

/// Drop every record of `set` whose id appears in `changes`.
pub fn apply_removed<R: Record>(set: &mut RecordSet<R>, changes: &RecordSet<R>) {
    for id in changes.ids() {
        set.remove(id);
    }
}

/// Replace records of `set` by the same-id records of `changes`.
///
/// Ids absent from `set` are ignored.
pub fn apply_changed<R: Record>(set: &mut RecordSet<R>, changes: &RecordSet<R>) {
    for record in changes.iter() {
        if !set.replace(record.clone()) {
            debug!(tag = R::TAG, id = %record.id(), "changed record not in state; ignoring");
        }
    }
}

fn merge_with<R: Record>(
    state: Option<&SerializedTree>,
    changes: &SerializedTree,
    apply: fn(&mut RecordSet<R>, &RecordSet<R>),
) -> SerializedTree {
    let mut set = RecordSet::<R>::from_payload(state);
    let changes = RecordSet::<R>::from_payload(Some(changes));
    apply(&mut set, &changes);
    set.to_payload(R::KIND.added())
}

/// State records plus the changes records with new ids.
pub fn merge_records_added<R: Record>(
    state: Option<&SerializedTree>,
    changes: &SerializedTree,
) -> SerializedTree {
    merge_with::<R>(state, changes, apply_added)
}

/// State records whose id does not appear in changes.
pub fn merge_records_removed<R: Record>(
    state: Option<&SerializedTree>,
    changes: &SerializedTree,
) -> SerializedTree {
    merge_with::<R>(state, changes, apply_removed)
}

/// State records, with those also present in changes replaced by the
/// changes value.
pub fn merge_records_changed<R: Record>(
    state: Option<&SerializedTree>,
    changes: &SerializedTree,
) -> SerializedTree {
    merge_with::<R>(state, changes, apply_changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_model::set::serialize_records;
    use stave_model::{AutomationEvent, Clip};
    use stave_types::DeltaType;

    fn ev(id: &str, beat: f64) -> AutomationEvent {
        AutomationEvent::new(id, beat, 0.5)
    }

    fn payload(delta_type: DeltaType, records: &[AutomationEvent]) -> SerializedTree {
        serialize_records(records, delta_type)
    }

    fn decode(payload: &SerializedTree) -> RecordSet<AutomationEvent> {
        RecordSet::from_payload(Some(payload))
    }

    #[test]
    fn added_merge_keeps_state_on_collision() {
        let state = payload(DeltaType::AutoEventsAdded, &[ev("1", 0.0)]);
        let changes = payload(DeltaType::AutoEventsAdded, &[ev("1", 4.0), ev("2", 1.0)]);
        let merged = merge_records_added::<AutomationEvent>(Some(&state), &changes);

        assert_eq!(merged.tag(), "autoEventsAdded");
        let set = decode(&merged);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&"1".into()).map(|e| e.beat), Some(0.0));
    }

    #[test]
    fn added_merge_is_idempotent() {
        let state = payload(DeltaType::AutoEventsAdded, &[ev("1", 0.0), ev("2", 1.0)]);
        let once = merge_records_added::<AutomationEvent>(Some(&state), &state);
        assert_eq!(once, state);
    }

    #[test]
    fn removed_merge_drops_listed_ids() {
        let state = payload(DeltaType::AutoEventsAdded, &[ev("1", 0.0), ev("2", 1.0)]);
        let changes = payload(DeltaType::AutoEventsRemoved, &[ev("1", 0.0), ev("9", 0.0)]);
        let merged = merge_records_removed::<AutomationEvent>(Some(&state), &changes);

        assert_eq!(merged.tag(), "autoEventsAdded");
        let ids: Vec<String> = decode(&merged).ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn changed_merge_replaces_by_id_and_ignores_misses() {
        let state = payload(DeltaType::AutoEventsAdded, &[ev("1", 0.0), ev("2", 1.0)]);
        let changes = payload(DeltaType::AutoEventsChanged, &[ev("2", 8.0), ev("3", 3.0)]);
        let merged = merge_records_changed::<AutomationEvent>(Some(&state), &changes);

        let set = decode(&merged);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&"2".into()).map(|e| e.beat), Some(8.0));
        assert!(!set.contains(&"3".into()));
    }

    #[test]
    fn absent_state_is_empty_base() {
        let changes = serialize_records(&[Clip::new("c", 2.0)], DeltaType::ClipsAdded);
        let merged = merge_records_added::<Clip>(None, &changes);
        assert_eq!(merged, changes);

        let removed = merge_records_removed::<Clip>(None, &changes);
        assert!(removed.is_empty());
        assert_eq!(removed.tag(), "clipsAdded");
    }
}
