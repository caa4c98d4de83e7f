// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use geodrill_selection::{Classification, FilterSet, Selection, classify};

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/classify");

    // Every region is classified on every render pass, and membership is a
    // linear scan, so cost grows with the number of hand-picked filters.
    let regions: Vec<u32> = (0..3_200).collect();
    group.throughput(Throughput::Elements(regions.len() as u64));
    for picked in [0usize, 1, 8, 64] {
        let mut filters = Selection::<u32>::new();
        for key in regions.iter().step_by(regions.len() / picked.max(1)).take(picked) {
            filters.toggle_filter(*key);
        }
        group.bench_with_input(BenchmarkId::from_parameter(picked), &filters, |b, filters| {
            b.iter(|| {
                regions
                    .iter()
                    .filter(|key| classify(filters, *key) == Classification::Selected)
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    c.bench_function("selection/toggle_burst", |b| {
        b.iter_batched(
            Selection::<u32>::new,
            |mut sel| {
                for key in (0..32).chain(0..32) {
                    sel.toggle_filter(key);
                }
                sel.notify_filters_changed();
                black_box(sel);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_classify, bench_toggle);
criterion_main!(benches);
