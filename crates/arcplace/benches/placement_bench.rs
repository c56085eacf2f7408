//! Criterion benchmarks for a full generate-and-place run.
//! Focus: candidate counts in {10, 50, 100} on the default 800×800 canvas.

use arcplace::factory::{ArcSpec, CircularCfg, Param};
use arcplace::placement::{generate, PlacementCfg, ReplayToken};
use arcplace::Canvas;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    group.sample_size(10);
    let spec = ArcSpec::Circular(CircularCfg {
        curvature: Param::range(0.002, 0.01),
        length: Param::range(50.0, 150.0),
    });
    for &n in &[10usize, 50, 100] {
        group.bench_with_input(BenchmarkId::new("generate", n), &n, |b, &n| {
            b.iter_batched(
                || ReplayToken::new(n as u64),
                |tok| generate(&spec, n, Canvas::default(), &PlacementCfg::default(), tok).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_placement);
criterion_main!(benches);
