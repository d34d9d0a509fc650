use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdfit_confidence::Bootstrap;
use pdfit_core::ExecutionStrategy;
use rand::prelude::*;
use rand_distr::Normal;

/// Generate normal data
fn generate_normal_data(size: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std).unwrap();
    (0..size).map(|_| normal.sample(&mut rng)).collect()
}

fn mean_and_variance(sample: &[f64]) -> Option<Vec<f64>> {
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let variance = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(vec![mean, variance])
}

fn bench_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bootstrap");
    let data = generate_normal_data(200, 100.0, 15.0, 42);
    let original = mean_and_variance(&data).unwrap();

    for &n_resamples in &[99, 399, 999] {
        for (label, strategy) in [
            ("sequential", ExecutionStrategy::Sequential),
            ("parallel", ExecutionStrategy::Parallel),
        ] {
            let bootstrap = Bootstrap::default()
                .with_resamples(n_resamples)
                .with_seed(7)
                .with_strategy(strategy);
            group.bench_with_input(BenchmarkId::new(label, n_resamples), &data, |b, data| {
                b.iter(|| {
                    bootstrap.parameter_estimates(
                        black_box(data),
                        &["mean", "variance"],
                        &original,
                        mean_and_variance,
                    )
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_bootstrap);
criterion_main!(benches);
