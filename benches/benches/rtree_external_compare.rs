// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use scribe_index::{Aabb2D, Index};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

/// Boxes along a meandering line, inserted in drawing order.
fn gen_stroke_boxes(count: usize) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(count);
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    for i in 0..count {
        let t = i as f64 * 0.01;
        let (nx, ny) = (x + 4.0 * t.cos(), y + 4.0 * (t * 1.7).sin());
        out.push(Aabb2D::new(
            x.min(nx) - 3.0,
            y.min(ny) - 3.0,
            x.max(nx) + 3.0,
            y.max(ny) + 3.0,
        ));
        (x, y) = (nx, ny);
    }
    out
}

fn to_rstar_rects(v: &[Aabb2D<f64>]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]))
        .collect()
}

fn bench_rtree_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_f64");
    for &n in &[4_096usize, 16_384] {
        let rects = gen_stroke_boxes(n);
        let q = rects[n / 2];
        let query = Aabb2D::new(q.min_x - 300.0, q.min_y - 200.0, q.max_x + 300.0, q.max_y + 200.0);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("scribe_incremental_n{n}"), |b| {
            b.iter_batched(
                Index::<f64, u32>::new,
                |mut idx| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        let _ = idx.insert(r, i as u32);
                    }
                    black_box(idx.query_rect(query).count());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_incremental_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners(
                        [query.min_x, query.min_y],
                        [query.max_x, query.max_y],
                    );
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("rstar_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [query.min_x, query.min_y],
                        [query.max_x, query.max_y],
                    );
                    black_box(tree.locate_in_envelope_intersecting(&aabb).count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_f64);
criterion_main!(benches);
