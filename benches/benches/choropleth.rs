// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geodrill_choropleth::{GeoChoropleth, RegionRef, WheelEvent};
use geodrill_selection::{FilterSet, Selection};
use kurbo::{Rect, Size};
use peniko::Color;

type Feature = (u32, Rect);

/// A country split into a `side` x `side` grid of states, each split into
/// a 4 x 4 grid of counties.
fn build_map(side: u32) -> GeoChoropleth<Feature, u32> {
    let cell = 1000.0 / f64::from(side);
    let mut states = Vec::new();
    let mut counties = Vec::new();
    for row in 0..side {
        for col in 0..side {
            let x = f64::from(col) * cell;
            let y = f64::from(row) * cell;
            let id = row * side + col;
            states.push((id, Rect::new(x, y, x + cell, y + cell)));
            let sub = cell / 4.0;
            for i in 0..16 {
                let cx = x + f64::from(i % 4) * sub;
                let cy = y + f64::from(i / 4) * sub;
                counties.push((id * 16 + i, Rect::new(cx, cy, cx + sub, cy + sub)));
            }
        }
    }

    let mut map = GeoChoropleth::new(Size::new(960.0, 600.0), |f: &Feature| f.1);
    let key = |f: &Feature| Some(f.0);
    map.overlay_layer("country", vec![(0, Rect::new(0.0, 0.0, 1000.0, 1000.0))], None)
        .unwrap();
    map.overlay_layer("state", states, Some(Rc::new(key))).unwrap();
    map.overlay_layer("county", counties, Some(Rc::new(key))).unwrap();
    map
}

fn ramp(value: Option<f64>, _: usize) -> Color {
    let v = value.unwrap_or(0.0).clamp(0.0, 255.0) as u8;
    Color::from_rgba8(v, 64, 255 - v, 255)
}

fn bench_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("choropleth/redraw");
    for side in [8u32, 16, 32] {
        let mut map = build_map(side);
        let region_count = side * side * 16;
        let rows: Vec<(u32, f64)> = (0..region_count)
            .map(|k| (k, f64::from(k % 256)))
            .collect();
        let mut filters = Selection::<u32>::new();
        filters.toggle_filter(3);
        filters.toggle_filter(region_count / 2);
        map.render(rows.iter().copied(), &filters, &ramp, 0).unwrap();

        group.bench_function(BenchmarkId::from_parameter(region_count), |b| {
            b.iter(|| black_box(map.redraw(rows.iter().copied(), &filters, &ramp, 0)));
        });
    }
    group.finish();
}

fn bench_wheel_burst(c: &mut Criterion) {
    let mut map = build_map(16);
    let filters = Selection::<u32>::new();
    map.render([], &filters, &ramp, 0).unwrap();

    // One applied drill per burst; the rest hit the cooldown.
    c.bench_function("choropleth/wheel_burst", |b| {
        let mut now = 0;
        b.iter(|| {
            map.roll_up(now).unwrap();
            for tick in 0..16 {
                let event = WheelEvent::new(Some(RegionRef::new(1, 5)), -1.0);
                black_box(map.wheel(event, &filters, now + tick).unwrap());
            }
            now += 1_000;
        });
    });
}

criterion_group!(benches, bench_redraw, bench_wheel_burst);
criterion_main!(benches);
