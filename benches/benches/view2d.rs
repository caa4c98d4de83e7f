// Copyright 2025 the Geodrill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geodrill_view2d::{DEFAULT_FIT_MARGIN, ViewTransform, fit_to_bounds};
use kurbo::{Rect, Size, Vec2};

fn bench_fit(c: &mut Criterion) {
    let canvas = Size::new(960.0, 600.0);
    let boxes: Vec<Rect> = (1..=64)
        .map(|i| {
            let i = f64::from(i);
            Rect::new(i, -i, i * 7.5, i * 3.25)
        })
        .collect();

    c.bench_function("view2d/fit_to_bounds", |b| {
        b.iter(|| {
            for bounds in &boxes {
                let _ = black_box(fit_to_bounds(
                    black_box(*bounds),
                    canvas,
                    DEFAULT_FIT_MARGIN,
                ));
            }
        });
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("view2d/parse");
    let rendered = ViewTransform::uniform(3.75, Vec2::new(-1234.5, 678.25))
        .unwrap()
        .to_string();
    let inputs = [
        ("rendered", rendered.as_str()),
        ("lone_scale", "scale(2)"),
        ("foreign", "rotate(45) translate(10 20) matrix(1,0,0,1,0,0) scale(1.5)"),
        ("malformed", "translate(10,20) scale(nope)"),
    ];
    for (name, src) in inputs {
        group.bench_with_input(BenchmarkId::new("from_str", name), src, |b, src| {
            b.iter(|| black_box(src.parse::<ViewTransform>()));
        });
    }
    group.bench_function("display", |b| {
        let t = ViewTransform::uniform(0.3, Vec2::new(17.0, -4.5)).unwrap();
        b.iter(|| black_box(black_box(t).to_string()));
    });
    group.finish();
}

criterion_group!(benches, bench_fit, bench_parse);
criterion_main!(benches);
