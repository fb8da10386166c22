// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_quad_tree::{PointQuadTree, RectQuadTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

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

fn gen_random_rects(count: usize, max_w: f64, max_h: f64, rect_w: f64, rect_h: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (max_w - rect_w).max(1.0);
        let y0 = rng.next_f64() * (max_h - rect_h).max(1.0);
        out.push(Rect::new(x0, y0, x0 + rect_w, y0 + rect_h));
    }
    out
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(cx + dx, cy + dy));
        }
    }
    out
}

fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

fn bench_build_and_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quad_tree_build_query");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let bounds = Rect::new(0.0, 0.0, n as f64 * 10.0, n as f64 * 10.0);
        let query = Rect::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("incremental_build_query_n{n}"), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| {
                    let mut tree: RectQuadTree<u32> = RectQuadTree::new(bounds);
                    for (i, r) in rects.into_iter().enumerate() {
                        let _ = tree.insert(r, i as u32);
                    }
                    let hits = tree.query(&query).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("bulk_build_query_n{n}"), |b| {
            b.iter_batched(
                || {
                    rects
                        .iter()
                        .copied()
                        .enumerate()
                        .map(|(i, r)| (r, i as u32))
                        .collect::<Vec<_>>()
                },
                |entries| {
                    let mut tree: RectQuadTree<u32> = RectQuadTree::new(bounds);
                    let _ = tree.bulk_insert(entries);
                    let hits = tree.query(&query).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("linear_scan_query_n{n}"), |b| {
            b.iter(|| {
                let hits = rects.iter().filter(|r| overlaps(&query, r)).count();
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_query_reused_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("quad_tree_query_reuse");
    let rects = gen_random_rects(10_000, 2000.0, 2000.0, 16.0, 16.0);
    let mut tree: RectQuadTree<u32> = RectQuadTree::new(Rect::new(0.0, 0.0, 2000.0, 2000.0));
    for (i, r) in rects.iter().copied().enumerate() {
        let _ = tree.insert(r, i as u32);
    }
    group.throughput(Throughput::Elements(10_000));

    let query = Rect::new(500.0, 500.0, 900.0, 900.0);
    let mut hits = Vec::new();
    group.bench_function("window_query_into", |b| {
        b.iter(|| {
            hits.clear();
            tree.query_into(&query, &mut hits);
            black_box(hits.len());
        })
    });

    group.bench_function("window_query_first_16", |b| {
        b.iter(|| {
            let first: usize = tree.query(&query).take(16).count();
            black_box(first);
        })
    });
    group.finish();
}

fn bench_update_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("quad_tree_update");
    let base = gen_random_rects(4_096, 2000.0, 2000.0, 12.0, 12.0);
    let alt: Vec<Rect> = base
        .iter()
        .map(|r| Rect::new(2000.0 - r.x1, 2000.0 - r.y1, 2000.0 - r.x0, 2000.0 - r.y0))
        .collect();
    let mut tree: RectQuadTree<u32> = RectQuadTree::new(Rect::new(0.0, 0.0, 2000.0, 2000.0));
    let keys: Vec<_> = base
        .iter()
        .copied()
        .enumerate()
        .map(|(i, r)| tree.insert(r, i as u32))
        .collect();
    group.throughput(Throughput::Elements(4_096));

    let mut flip = false;
    group.bench_function("relocate_all", |b| {
        b.iter(|| {
            flip = !flip;
            let target = if flip { &alt } else { &base };
            for (j, &key) in keys.iter().enumerate() {
                tree.update(key, target[j]);
            }
        })
    });
    group.finish();
}

fn bench_clustered_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("quad_tree_points");
    let points = gen_clustered_points(64, 256, 120.0);
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("bulk_build_clustered", |b| {
        b.iter_batched(
            || {
                points
                    .iter()
                    .copied()
                    .enumerate()
                    .map(|(i, p)| (p, i as u32))
                    .collect::<Vec<_>>()
            },
            |entries| {
                let mut tree: PointQuadTree<u32> =
                    PointQuadTree::new(Rect::new(0.0, 0.0, 2000.0, 2000.0));
                let _ = tree.bulk_insert(entries);
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        )
    });

    let mut tree: PointQuadTree<u32> = PointQuadTree::new(Rect::new(0.0, 0.0, 2000.0, 2000.0));
    let _ = tree.bulk_insert(
        points
            .iter()
            .copied()
            .enumerate()
            .map(|(i, p)| (p, i as u32))
            .collect(),
    );
    group.bench_function("window_query_clustered", |b| {
        b.iter(|| {
            let hits = tree.query(&Rect::new(800.0, 800.0, 1200.0, 1200.0)).count();
            black_box(hits);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_build_and_query,
    bench_query_reused_buffer,
    bench_update_churn,
    bench_clustered_points
);
criterion_main!(benches);
