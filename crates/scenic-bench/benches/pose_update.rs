//! Criterion benchmarks for full pose updates over chained frames.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scenic_bench::{chain_profile, reference_profile, stress_profile, BenchScene};
use scenic_core::{AutoDiff, Scalar};
use scenic_engine::GeometryContext;

/// Allocate a context and fix the pose records for time `t` on it.
fn prepared_context<T: Scalar>(scene: &BenchScene<T>, t: f64) -> GeometryContext<T> {
    let mut ctx = scene.graph.allocate_context();
    for poses in scene.poses_at(t) {
        let port = scene.graph.source_pose_port(poses.source_id()).unwrap();
        ctx.set_pose_input(port, poses).unwrap();
    }
    ctx
}

/// Benchmark: full pose update, 100 frames / 200 geometries.
fn bench_pose_update_reference(c: &mut Criterion) {
    let scene = reference_profile().unwrap();
    let mut ctx = prepared_context(&scene, 0.3);
    c.bench_function("pose_update_reference", |b| {
        b.iter(|| {
            let stats = scene.graph.full_pose_update(&mut ctx).unwrap();
            black_box(stats);
        });
    });
}

/// Benchmark: full pose update, 1K frames / 2K geometries.
fn bench_pose_update_stress(c: &mut Criterion) {
    let scene = stress_profile().unwrap();
    let mut ctx = prepared_context(&scene, 0.3);
    c.bench_function("pose_update_stress", |b| {
        b.iter(|| {
            let stats = scene.graph.full_pose_update(&mut ctx).unwrap();
            black_box(stats);
        });
    });
}

/// Benchmark: full pose update over `AutoDiff<6>` on the reference shape.
fn bench_pose_update_autodiff(c: &mut Criterion) {
    let scene = chain_profile::<AutoDiff<6>>(10, 10, 2).unwrap();
    let mut ctx = prepared_context(&scene, 0.3);
    c.bench_function("pose_update_autodiff6", |b| {
        b.iter(|| {
            let stats = scene.graph.full_pose_update(&mut ctx).unwrap();
            black_box(stats);
        });
    });
}

/// Benchmark: refill inputs then update, as a simulation step would.
fn bench_step_reference(c: &mut Criterion) {
    let scene = reference_profile().unwrap();
    let mut ctx = scene.graph.allocate_context();
    let mut t = 0.0;
    c.bench_function("step_reference", |b| {
        b.iter(|| {
            for poses in scene.poses_at(t) {
                let port = scene.graph.source_pose_port(poses.source_id()).unwrap();
                ctx.set_pose_input(port, poses).unwrap();
            }
            let stats = scene.graph.full_pose_update(&mut ctx).unwrap();
            black_box(stats);
            t += 0.01;
        });
    });
}

criterion_group!(
    benches,
    bench_pose_update_reference,
    bench_pose_update_stress,
    bench_pose_update_autodiff,
    bench_step_reference
);
criterion_main!(benches);
