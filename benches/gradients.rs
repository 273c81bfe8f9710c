use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use dimdiff::prelude::*;

fn build_chain(len: usize) -> (Node, Node) {
    let x = variable("x", Quantity::new(1.0, METRE));
    let mut y = x.clone();
    for _ in 0..len {
        y = (&(&y * 1.000_1).unwrap() + &Quantity::new(1.0, MILLIMETRE)).unwrap();
    }
    (x, y)
}

fn build_fan_in(width: usize) -> (Vec<Node>, Node) {
    let inputs: Vec<Node> = (0..width)
        .map(|i| variable(format!("x{i}"), Quantity::new(i as f64, SECOND)))
        .collect();
    let squares: Vec<Node> = inputs.iter().map(|x| x.powi(2).unwrap()).collect();
    let total = sum_nodes(&squares).unwrap();
    (inputs, total)
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    for len in [100, 1_000] {
        group.bench_function(BenchmarkId::new("build", len), |b| {
            b.iter(|| build_chain(len))
        });
        group.bench_function(BenchmarkId::new("differentiate", len), |b| {
            b.iter_batched(
                || build_chain(len),
                |(x, y)| differentiate(&y, [&x]).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_fan_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_in");
    for width in [100, 1_000] {
        group.bench_function(BenchmarkId::new("differentiate", width), |b| {
            b.iter_batched(
                || build_fan_in(width),
                |(inputs, total)| differentiate(&total, inputs.iter()).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain, bench_fan_in);
criterion_main!(benches);
