// Copyright 2025 the Scribe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use scribe_canvas::{SegmentStore, Stroke};
use scribe_index::{Aabb2D, FlatIndex, Index};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A pen wandering around the plane: each piece starts where the last ended.
fn gen_stroke_walk(count: usize, step: f64, radius: f64) -> Vec<Stroke> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count);
    let mut at = Point::ORIGIN;
    let mut heading: f64 = 0.0;
    for _ in 0..count {
        heading += (rng.next_f64() - 0.5) * 0.6;
        let next = at + Vec2::from_angle(heading) * step;
        out.push(Stroke::new(at, next, radius));
        at = next;
    }
    out
}

/// Many short strokes scattered at random, like a page of handwriting.
fn gen_scattered_strokes(count: usize, extent: f64) -> Vec<Stroke> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let a = Point::new(rng.next_f64() * extent, rng.next_f64() * extent);
        let d = Vec2::new(rng.next_f64() - 0.5, rng.next_f64() - 0.5) * 16.0;
        out.push(Stroke::new(a, a + d, 2.0));
    }
    out
}

fn boxes(strokes: &[Stroke]) -> Vec<Aabb2D<f64>> {
    strokes.iter().map(Stroke::bounds).collect()
}

fn viewport_around(s: &[Stroke], w: f64, h: f64) -> Aabb2D<f64> {
    let mid = s[s.len() / 2].a;
    Aabb2D::from_xywh(mid.x - w * 0.5, mid.y - h * 0.5, w, h)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("stroke_insert");
    for &n in &[1_000usize, 10_000] {
        let rects = boxes(&gen_stroke_walk(n, 4.0, 3.0));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("bvh_n{n}"), |b| {
            b.iter_batched(
                Index::<f64, u32>::new,
                |mut idx| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        let _ = idx.insert(r, i as u32);
                    }
                    black_box(idx.height());
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("flat_n{n}"), |b| {
            b.iter_batched(
                FlatIndex::<f64, u32>::new,
                |mut idx| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        let _ = idx.insert(r, i as u32);
                    }
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_viewport_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport_query");
    for &n in &[1_000usize, 10_000, 100_000] {
        let strokes = gen_scattered_strokes(n, 20_000.0);
        let rects = boxes(&strokes);
        let view = viewport_around(&strokes, 1280.0, 720.0);
        let mut bvh = Index::<f64, u32>::new();
        let mut flat = FlatIndex::<f64, u32>::new();
        for (i, r) in rects.iter().copied().enumerate() {
            let _ = bvh.insert(r, i as u32);
            let _ = flat.insert(r, i as u32);
        }
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("bvh_n{n}"), |b| {
            b.iter(|| black_box(bvh.query_rect(view).count()));
        });
        if n <= 10_000 {
            group.bench_function(format!("flat_n{n}"), |b| {
                b.iter(|| black_box(flat.query_rect(view).count()));
            });
        }
    }
    group.finish();
}

fn bench_undo_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_churn");
    let strokes = gen_stroke_walk(20_000, 4.0, 3.0);
    let rects = boxes(&strokes);
    group.bench_function("bvh_remove_reinsert_last_500", |b| {
        b.iter_batched(
            || {
                let mut idx = Index::<f64, u32>::new();
                let keys: Vec<_> = rects
                    .iter()
                    .copied()
                    .enumerate()
                    .map(|(i, r)| idx.insert(r, i as u32))
                    .collect();
                (idx, keys)
            },
            |(mut idx, keys)| {
                for &k in keys.iter().rev().take(500) {
                    black_box(idx.remove(k).ok());
                }
                for (i, r) in rects.iter().copied().enumerate().skip(rects.len() - 500) {
                    let _ = idx.insert(r, i as u32);
                }
                black_box(idx.height());
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_store");
    let strokes = gen_scattered_strokes(50_000, 20_000.0);
    let mut store = SegmentStore::new();
    for s in &strokes {
        let _ = store.create(*s);
    }
    let mid = strokes[strokes.len() / 2].a;
    for &(w, h) in &[(640.0, 360.0), (2560.0, 1440.0)] {
        let view = Rect::from_center_size(mid, (w, h));
        group.bench_function(format!("query_view_{w}x{h}"), |b| {
            b.iter(|| black_box(store.query_view(view).len()));
        });
    }
    group.bench_function("create_then_undo", |b| {
        let s = Stroke::new(mid, mid + Vec2::new(3.0, 1.0), 2.0);
        b.iter(|| {
            let _ = black_box(store.create(s));
            let _ = black_box(store.undo());
        });
    });
    group.finish();
}

fn bench_i64(c: &mut Criterion) {
    let mut group = c.benchmark_group("bvh_i64");
    for &n in &[64i64, 128] {
        let mut rects = Vec::new();
        for y in 0..n {
            for x in 0..n {
                rects.push(Aabb2D::<i64>::from_xywh(x * 10, y * 10, 10, 10));
            }
        }
        group.throughput(Throughput::Elements(rects.len() as u64));
        group.bench_function(format!("insert_query_n{n}"), |b| {
            b.iter_batched(
                Index::<i64, u32>::new,
                |mut idx| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        let _ = idx.insert(r, i as u32);
                    }
                    black_box(idx.query_rect(Aabb2D::new(100, 100, 500, 500)).count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_viewport_query,
    bench_undo_churn,
    bench_store,
    bench_i64
);
criterion_main!(benches);
