//! The schema-driven diff and merge engine shared by every diff logic.
//!
//! The engine walks the deltas of one item and dispatches each to the
//! handler of its family. Which families it knows is decided by the node's
//! [`NodeSchema`]; how each family is diffed and merged by the
//! [`DeltaRegistry`].

use stave_diff::{DeltaDiff, Diff, TrackedItem};
use stave_model::scalar::default_payload;
use stave_tree::SerializedTree;
use stave_types::{CollectionOp, Delta, DeltaFamily, DeltaType};
use tracing::debug;

use crate::config::EngineConfig;
use crate::registry::{CollectionHandler, DeltaHandler, DeltaRegistry};
use crate::schema::NodeSchema;

/// Diffs and merges the delta sets of one node kind.
#[derive(Clone, Debug)]
pub struct DeltaEngine {
    schema: NodeSchema,
    registry: DeltaRegistry,
    config: EngineConfig,
}

impl DeltaEngine {
    /// An engine using the standard handler of every family.
    pub fn new(schema: NodeSchema, config: EngineConfig) -> Self {
        Self::with_registry(schema, DeltaRegistry::standard(), config)
    }

    pub fn with_registry(schema: NodeSchema, registry: DeltaRegistry, config: EngineConfig) -> Self {
        Self {
            schema,
            registry,
            config,
        }
    }

    pub fn schema(&self) -> &NodeSchema {
        &self.schema
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The handler of `family`, if the node kind supports it.
    fn handler(&self, family: DeltaFamily) -> Option<&DeltaHandler> {
        if !self.schema.recognizes(family) {
            return None;
        }
        self.registry.get(family)
    }

    /// Diff `state` against `changes`.
    ///
    /// For each delta of `changes` the same type is looked up in `state`. A
    /// delta is diffed when the state lacks it and its payload is not the
    /// default, or when the two payloads are not equivalent. Collections are
    /// diffed through their `Added` type only; unrecognized types are skipped.
    pub fn create_diff(&self, changes: &dyn TrackedItem, state: &dyn TrackedItem) -> Diff {
        let mut result = Diff::new(changes.identity_type());

        for index in 0..changes.delta_count() {
            let Some(delta) = changes.delta_at(index) else {
                continue;
            };
            let delta_type = delta.delta_type();
            let Some(handler) = self.handler(delta.family()) else {
                debug!(kind = %self.schema.kind(), %delta_type, "skipping unrecognized delta type");
                continue;
            };
            if matches!(delta_type.collection(), Some((_, op)) if op != CollectionOp::Added) {
                continue;
            }

            let changes_payload = payload_or_default(changes, index, delta_type);
            let state_payload = state
                .find_delta(delta_type)
                .map(|i| payload_or_default(state, i, delta_type));

            let differs = match &state_payload {
                None => !changes.delta_has_default_payload(index),
                Some(payload) => !payload.is_equivalent_to(&changes_payload),
            };
            if !differs {
                continue;
            }

            match handler {
                DeltaHandler::Scalar { diff, .. } => {
                    result.apply_delta(diff(state_payload.as_ref(), &changes_payload));
                }
                DeltaHandler::Collection(collection) => {
                    result.apply_deltas((collection.diff)(state_payload.as_ref(), &changes_payload));
                }
            }
        }

        debug!(kind = %self.schema.kind(), deltas = result.len(), "created diff");
        result
    }

    /// Merge `target` onto `state`, producing the delta set of the new head.
    ///
    /// Every state delta is either merged with the target's deltas of the
    /// same family or copied forward unchanged. Families the state lacks are
    /// then synthesized (see [`EngineConfig::synthesize_missing_families`]).
    pub fn create_merged_item(&self, target: &dyn TrackedItem, state: &dyn TrackedItem) -> Diff {
        let mut merged = Diff::new(target.identity_type());
        let mut folded: Vec<DeltaFamily> = Vec::new();

        for index in 0..state.delta_count() {
            let Some(delta) = state.delta_at(index) else {
                continue;
            };
            let family = delta.family();
            if folded.contains(&family) {
                continue;
            }
            let delta_type = delta.delta_type();

            match self.handler(family) {
                Some(DeltaHandler::Scalar { merge, .. }) => match target.find_delta(delta_type) {
                    Some(t) => {
                        let state_payload = payload_or_default(state, index, delta_type);
                        let payload = merge(
                            Some(&state_payload),
                            &payload_or_default(target, t, delta_type),
                        );
                        let description = target
                            .delta_at(t)
                            .map(|d| d.description().clone())
                            .unwrap_or_else(|| self.config.head_state());
                        merged.apply_delta(DeltaDiff::from_parts(delta_type, description, payload));
                    }
                    None => merged.apply_delta(copy_forward(state, index, delta)),
                },
                Some(DeltaHandler::Collection(collection)) => {
                    let target_ops = family_deltas(target, family);
                    if target_ops.is_empty() {
                        merged.apply_delta(copy_forward(state, index, delta));
                        continue;
                    }
                    folded.push(family);

                    let base = fold(collection, empty_snapshot(collection), &family_deltas(state, family));
                    let payload = fold(collection, base, &target_ops);
                    merged.apply_delta(DeltaDiff::from_parts(
                        collection.kind.added(),
                        self.config.head_state(),
                        payload,
                    ));
                }
                None => {
                    debug!(kind = %self.schema.kind(), %delta_type, "copying unrecognized delta forward");
                    merged.apply_delta(copy_forward(state, index, delta));
                }
            }
        }

        if self.config.synthesize_missing_families {
            self.synthesize_missing(target, state, &mut merged);
        }

        debug!(kind = %self.schema.kind(), deltas = merged.len(), "created merged item");
        merged
    }

    /// Emit the schema families the state has never recorded.
    ///
    /// Required families are always emitted; optional ones only when the
    /// target contributes deltas of that family. Either way the result is the
    /// target's contribution merged onto an empty base.
    fn synthesize_missing(&self, target: &dyn TrackedItem, state: &dyn TrackedItem, merged: &mut Diff) {
        for spec in self.schema.families() {
            if state.has_family(spec.family) {
                continue;
            }
            if !spec.required && !target.has_family(spec.family) {
                continue;
            }
            let Some(handler) = self.registry.get(spec.family) else {
                continue;
            };

            let delta = match handler {
                DeltaHandler::Scalar { merge, .. } => {
                    let delta_type = spec.family.snapshot_type();
                    match target.find_delta(delta_type) {
                        Some(t) => {
                            let description = target
                                .delta_at(t)
                                .map(|d| d.description().clone())
                                .unwrap_or_else(|| self.config.head_state());
                            let payload = merge(None, &payload_or_default(target, t, delta_type));
                            DeltaDiff::from_parts(delta_type, description, payload)
                        }
                        None => DeltaDiff::from_parts(
                            delta_type,
                            self.config.head_state(),
                            default_payload(delta_type),
                        ),
                    }
                }
                DeltaHandler::Collection(collection) => {
                    let payload = fold(
                        collection,
                        empty_snapshot(collection),
                        &family_deltas(target, spec.family),
                    );
                    DeltaDiff::from_parts(collection.kind.added(), self.config.head_state(), payload)
                }
            };

            debug!(
                kind = %self.schema.kind(),
                family = %spec.family,
                required = spec.required,
                "synthesized missing family"
            );
            merged.apply_delta(delta);
        }
    }
}

/// The payload at `index`, or the type's default when it is missing.
fn payload_or_default(item: &dyn TrackedItem, index: usize, delta_type: DeltaType) -> SerializedTree {
    item.delta_payload_at(index)
        .unwrap_or_else(|| default_payload(delta_type))
}

fn copy_forward(state: &dyn TrackedItem, index: usize, delta: &Delta) -> DeltaDiff {
    DeltaDiff::new(
        delta.clone(),
        payload_or_default(state, index, delta.delta_type()),
    )
}

/// The collection deltas of `family` in `item`, in item order.
fn family_deltas(item: &dyn TrackedItem, family: DeltaFamily) -> Vec<(CollectionOp, SerializedTree)> {
    (0..item.delta_count())
        .filter_map(|index| {
            let delta_type = item.delta_at(index)?.delta_type();
            if !family.contains(delta_type) {
                return None;
            }
            let (_, op) = delta_type.collection()?;
            Some((op, payload_or_default(item, index, delta_type)))
        })
        .collect()
}

fn empty_snapshot(collection: &CollectionHandler) -> SerializedTree {
    default_payload(collection.kind.added())
}

/// Apply `ops` in order onto `base`.
fn fold(
    collection: &CollectionHandler,
    base: SerializedTree,
    ops: &[(CollectionOp, SerializedTree)],
) -> SerializedTree {
    ops.iter().fold(base, |acc, (op, changes)| {
        (collection.merge_fn(*op))(Some(&acc), changes)
    })
}
