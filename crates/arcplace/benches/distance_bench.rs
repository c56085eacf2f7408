//! Criterion benchmarks for the two distance engines.
//! Focus: arc lengths in {50, 200, 800} for the sampled engine.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p arcplace

use arcplace::distance::{exact_min_distance, fast_min_distance};
use arcplace::{Arc, Canvas};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector2;

fn pair(length: f64) -> (Arc, Arc) {
    let r = 100.0;
    let sweep = length / r;
    let a = Arc::circular(r, 0.2, 0.2 + sweep, Canvas::default())
        .unwrap()
        .with_center(Vector2::new(250.0, 300.0));
    let b = Arc::circular(r, 2.0, 2.0 + sweep, Canvas::default())
        .unwrap()
        .with_center(Vector2::new(520.0, 380.0));
    (a, b)
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance");
    for &len in &[50.0f64, 200.0, 800.0] {
        let (a, b) = pair(len);
        group.bench_with_input(BenchmarkId::new("fast", len as u64), &len, |bch, _| {
            bch.iter(|| fast_min_distance(&a, &b))
        });
        group.bench_with_input(BenchmarkId::new("exact", len as u64), &len, |bch, _| {
            bch.iter(|| exact_min_distance(&a, &b).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_distance);
criterion_main!(benches);
