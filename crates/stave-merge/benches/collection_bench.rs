//! Benchmarks for identity-based collection diff and merge at scale.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stave_diff::{create_records_diffs, ItemSnapshot};
use stave_merge::{diff_items, merge_items, EngineConfig};
use stave_model::{AutomationEvent, RecordSet};
use stave_tree::SerializedTree;
use stave_types::{DeltaType, NodeKind};

/// `count` events, every `stride`-th one shifted by `offset` beats.
fn events(count: u64, stride: u64, offset: f64) -> SerializedTree {
    let set: RecordSet<AutomationEvent> = (0..count)
        .map(|i| {
            let beat = i as f64 * 0.25;
            let beat = if stride > 0 && i % stride == 0 { beat + offset } else { beat };
            AutomationEvent::new(i, beat, (i % 128) as f64 / 127.0)
        })
        .collect();
    set.to_payload(DeltaType::AutoEventsAdded)
}

fn track(payload: SerializedTree) -> ItemSnapshot {
    ItemSnapshot::new(NodeKind::AutomationTrack).with_payload(DeltaType::AutoEventsAdded, payload)
}

fn bench_collection_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_diff");
    for count in [100u64, 1_000, 10_000] {
        let state = events(count, 0, 0.0);
        let changes = events(count, 10, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| create_records_diffs::<AutomationEvent>(black_box(Some(&state)), black_box(&changes)));
        });
    }
    group.finish();
}

fn bench_diff_then_merge(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("diff_then_merge");
    for count in [100u64, 1_000, 10_000] {
        let state = track(events(count, 0, 0.0));
        let changes = track(events(count + count / 10, 7, 0.5));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let diff = diff_items(&state, &changes, &config).unwrap();
                merge_items(black_box(&state), black_box(&diff), &config).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_collection_diff, bench_diff_then_merge);
criterion_main!(benches);
