//! Criterion benchmarks for whole-world ticking.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use gridwalk_bench::{reference_profile, stress_profile};
use gridwalk_engine::{state_hash, LockstepWorld};

fn bench_reference_tick(c: &mut Criterion) {
    let mut world = LockstepWorld::new(reference_profile(42)).unwrap();
    c.bench_function("tick_reference_25x25", |b| {
        b.iter(|| black_box(world.tick()));
    });
}

fn bench_stress_tick(c: &mut Criterion) {
    let mut world = LockstepWorld::new(stress_profile(42)).unwrap();
    c.bench_function("tick_stress_200x200", |b| {
        b.iter(|| black_box(world.tick()));
    });
}

fn bench_reference_1000_ticks(c: &mut Criterion) {
    c.bench_function("run_reference_1000_ticks", |b| {
        b.iter_batched(
            || LockstepWorld::new(reference_profile(7)).unwrap(),
            |mut world| {
                world.run(1000);
                black_box(state_hash(&world.view()))
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_view_capture(c: &mut Criterion) {
    let mut world = LockstepWorld::new(stress_profile(3)).unwrap();
    world.run(64);
    c.bench_function("view_capture_200x200", |b| {
        b.iter(|| black_box(world.view()));
    });
}

criterion_group!(
    benches,
    bench_reference_tick,
    bench_stress_tick,
    bench_reference_1000_ticks,
    bench_view_capture
);
criterion_main!(benches);
