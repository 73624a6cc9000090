use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use witness::{map, PartiallyApplied};
use witness_tests::units::Meters;

// the wrapper claims to be zero-cost over the payload; measure the claim
fn bench_wrapper_arithmetic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sum wrapped vs raw");

    for size in [1_000usize, 100_000] {
        let raw: Vec<f64> = (0..size).map(|n| n as f64 * 0.5).collect();
        let wrapped: Vec<Meters> = raw.iter().copied().map(Meters::new).collect();

        group.bench_with_input(BenchmarkId::new("raw f64", size), &raw, |b, xs| {
            b.iter(|| xs.iter().copied().fold(0.0f64, |acc, x| acc + x))
        });

        group.bench_with_input(BenchmarkId::new("meters wrapper", size), &wrapped, |b, xs| {
            b.iter(|| xs.iter().copied().fold(Meters::new(0.0), |acc, x| acc + x))
        });
    }
    group.finish();
}

fn bench_functor_map(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map dispatch vs iterator");

    for size in [1_000usize, 100_000] {
        let xs: Vec<i64> = (0..size as i64).collect();

        group.bench_with_input(BenchmarkId::new("iterator map", size), &xs, |b, xs| {
            b.iter(|| xs.clone().into_iter().map(|n| n * 3).collect::<Vec<_>>())
        });

        group.bench_with_input(BenchmarkId::new("functor map", size), &xs, |b, xs| {
            b.iter(|| map::<Vec<PartiallyApplied>, _, _>(xs.clone(), |n| n * 3))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wrapper_arithmetic, bench_functor_map);
criterion_main!(benches);
