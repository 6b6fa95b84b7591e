use criterion::*;
use std::hint::black_box;

use ecs_core::prelude::*;

#[derive(Clone, Copy)]
struct Position {
    _x: f32,
    _y: f32,
}

impl Component for Position {
    const NAME: Option<&'static str> = Some("position");
}

#[derive(Clone, Copy)]
struct Velocity {
    _dx: f32,
    _dy: f32,
}

impl Component for Velocity {
    const NAME: Option<&'static str> = Some("velocity");
}

/// Builds a constraint set of `size` distinct synthetic components, all
/// reads except one write, so pairwise checks walk the whole set.
fn synthetic_set(size: usize, salt: &str) -> ConstraintSet {
    let mut constraints = Vec::with_capacity(size);
    for i in 0..size {
        let fingerprint = resolve_fingerprint(&format!("{salt}-component-{i}"));
        let mode = if i == 0 {
            AccessMode::Write
        } else {
            AccessMode::Read
        };
        constraints.push(AccessConstraint::new(mode, fingerprint));
    }
    ConstraintSet::new(constraints).unwrap()
}

fn conflict_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("conflict");

    for &size in &[4usize, 16, 64] {
        let a = synthetic_set(size, "left");
        let b = synthetic_set(size, "right");

        group.bench_function(format!("may_run_concurrently_{size}x{size}"), |bench| {
            bench.iter(|| black_box(&a).may_run_concurrently_with(black_box(&b)))
        });
    }

    group.bench_function("constraint_set_build_64", |bench| {
        let fingerprints: Vec<Fingerprint> = (0..64)
            .map(|i| resolve_fingerprint(&format!("build-component-{i}")))
            .collect();
        bench.iter(|| {
            let constraints: Vec<AccessConstraint> = fingerprints
                .iter()
                .map(|&fp| AccessConstraint::new(AccessMode::Read, fp))
                .collect();
            ConstraintSet::new(black_box(constraints)).unwrap()
        })
    });

    group.finish();
}

fn storage_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage");

    group.bench_function("push_10k", |bench| {
        bench.iter_batched(
            Position::make_container,
            |mut container| {
                for i in 0..10_000 {
                    container
                        .push(Position {
                            _x: i as f32,
                            _y: 0.0,
                        })
                        .unwrap();
                }
                container
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("swap_remove_drain_10k", |bench| {
        bench.iter_batched(
            || {
                let mut container = Velocity::make_container();
                for i in 0..10_000 {
                    container
                        .push(Velocity {
                            _dx: i as f32,
                            _dy: 0.0,
                        })
                        .unwrap();
                }
                container
            },
            |mut container| {
                while !container.is_empty() {
                    container.swap_remove(0);
                }
                container
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, conflict_benchmark, storage_benchmark);
criterion_main!(benches);
