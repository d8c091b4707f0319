//! Criterion benchmarks for the annealing search and its neighborhood.
//!
//! Uses random weighted 3-SAT instances at the satisfiability threshold
//! (clause/variable ratio ~4.26).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_maxsat::sa::{NeighborGenerator, SaConfig, SaRunner};
use u_maxsat::{Instance, Objective};

fn random_3sat(num_vars: usize, seed: u64) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);
    let num_clauses = (num_vars as f64 * 4.26) as usize;
    let weights: Vec<u64> = (0..num_vars).map(|_| rng.random_range(1..100)).collect();
    let clauses: Vec<Vec<i32>> = (0..num_clauses)
        .map(|_| {
            (0..3)
                .map(|_| {
                    let var = rng.random_range(1..=num_vars as i32);
                    if rng.random_bool(0.5) {
                        var
                    } else {
                        -var
                    }
                })
                .collect()
        })
        .collect();
    Instance::new(format!("r{num_vars}"), num_vars, weights, clauses)
        .expect("generated literals are in range")
}

fn bench_neighbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor");

    for &n in &[20usize, 50, 100] {
        let instance = random_3sat(n, 42);
        let generator = NeighborGenerator::default();
        let assignment = vec![false; n];
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, inst| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(generator.neighbor(inst, black_box(&assignment), &mut rng)))
        });
    }
    group.finish();
}

fn bench_sa_3sat(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_3sat");
    group.sample_size(10);

    for &n in &[20usize, 50] {
        let instance = random_3sat(n, 42);
        let config = SaConfig::auto_tuned(&instance).with_alpha(0.95);
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, inst| {
            let objective = Objective::new(inst).expect("weights are positive");
            let generator = NeighborGenerator::default();
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                let result =
                    SaRunner::run(black_box(&objective), &generator, &config, &mut rng, None);
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_neighbor, bench_sa_3sat);
criterion_main!(benches);
