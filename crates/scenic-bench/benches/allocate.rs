//! Criterion benchmarks for context allocation and transmogrification.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scenic_bench::{reference_profile, stress_profile};
use scenic_core::AutoDiff;

/// Benchmark: allocate a context from the 100-frame model.
fn bench_allocate_reference(c: &mut Criterion) {
    let scene = reference_profile().unwrap();
    c.bench_function("allocate_reference", |b| {
        b.iter(|| black_box(scene.graph.allocate_context()));
    });
}

/// Benchmark: allocate a context from the 1K-frame model.
fn bench_allocate_stress(c: &mut Criterion) {
    let scene = stress_profile().unwrap();
    c.bench_function("allocate_stress", |b| {
        b.iter(|| black_box(scene.graph.allocate_context()));
    });
}

/// Benchmark: convert the 100-frame model to `AutoDiff<6>`.
fn bench_transmogrify_reference(c: &mut Criterion) {
    let scene = reference_profile().unwrap();
    c.bench_function("transmogrify_reference_autodiff6", |b| {
        b.iter(|| black_box(scene.graph.transmogrify::<AutoDiff<6>>()));
    });
}

criterion_group!(
    benches,
    bench_allocate_reference,
    bench_allocate_stress,
    bench_transmogrify_reference
);
criterion_main!(benches);
