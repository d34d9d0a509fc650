//! Behavioural checks that hold across the built-in estimators

use approx::assert_relative_eq;
use pdfit_core::{Family, StatisticSummary};
use pdfit_estimate::{
    families::gamma, EstimationFailure, Estimator, EstimatorConfig, ParameterEstimator, ShiftEstimator,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, Gamma};

fn run(estimator: Estimator, data: &[f64]) -> pdfit_estimate::EstimationResult {
    estimator.estimate(data, &StatisticSummary::of(data), &EstimatorConfig::default())
}

#[test]
fn empty_data_fails_everywhere() {
    for estimator in Estimator::ALL {
        let result = run(estimator, &[]);
        assert!(!result.success(), "{estimator} accepted an empty sample");
        assert!(
            matches!(result.failure(), Some(EstimationFailure::TooFewObservations { .. })),
            "{estimator}: {}",
            result.message()
        );
        assert!(result.message().starts_with("There must be at least"));
    }
}

#[test]
fn equal_observations_fail_for_continuous_shapes() {
    let data = [4.0; 20];
    for estimator in [
        Estimator::Normal,
        Estimator::Lognormal,
        Estimator::GammaMoments,
        Estimator::GammaMle,
        Estimator::WeibullMle,
        Estimator::WeibullPercentile,
        Estimator::GeneralizedBeta,
        Estimator::Uniform,
        Estimator::Triangular,
        Estimator::Logistic,
        Estimator::Laplace,
    ] {
        let result = run(estimator, &data);
        assert!(!result.success(), "{estimator} accepted equal observations");
        assert!(result.distribution().is_none());
    }
}

#[test]
fn negative_data_fails_for_non_negative_families() {
    let data = [-1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
    for estimator in Estimator::ALL {
        let result = run(estimator, &data);
        let non_negative = matches!(
            estimator.family(),
            Family::Exponential
                | Family::Lognormal
                | Family::Gamma
                | Family::Weibull
                | Family::Beta
                | Family::Binomial
                | Family::NegativeBinomial
                | Family::Poisson
        );
        assert_eq!(!result.success(), non_negative, "{estimator}: {}", result.message());
    }
}

#[test]
fn successful_results_build_distributions() {
    let data = [1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0, 7.0, 9.0, 12.0];
    for estimator in [
        Estimator::Exponential,
        Estimator::Normal,
        Estimator::Lognormal,
        Estimator::GammaMle,
        Estimator::WeibullMle,
        Estimator::NegativeBinomial,
        Estimator::Poisson,
        Estimator::Uniform,
        Estimator::Triangular,
        Estimator::Logistic,
        Estimator::Laplace,
    ] {
        let result = run(estimator, &data);
        assert!(result.success(), "{estimator}: {}", result.message());
        let fitted = result.distribution().unwrap();
        assert_eq!(fitted.family(), estimator.family());
    }
}

#[test]
fn gamma_mle_recovers_mean() {
    // mean 5, variance 2
    let source = Gamma::new(12.5, 0.4).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let data: Vec<f64> = (0..1000).map(|_| source.sample(&mut rng)).collect();

    let result = run(Estimator::GammaMle, &data);
    assert!(result.success(), "{}", result.message());
    let params = result.parameters().unwrap();
    let shape = params.get("shape").unwrap();
    let scale = params.get("scale").unwrap();
    assert_relative_eq!(shape * scale, 5.0, max_relative = 0.05);
    assert!(shape > 8.0 && shape < 18.0, "shape {shape}");
}

#[test]
fn gamma_mle_falls_back_on_zeros() {
    let data = [0.0, 1.0, 2.0, 3.0, 2.5, 1.5];
    let stats = StatisticSummary::of(&data);
    let fit = gamma::estimate_mle(&data, &stats, &EstimatorConfig::default()).unwrap();
    assert!(gamma::is_fallback(&fit));

    let result = run(Estimator::GammaMle, &data);
    assert!(result.success());
    assert!(result.message().contains("method of moments"));
}

#[test]
fn exponential_recovers_mean() {
    let source = Exp::new(0.1).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let data: Vec<f64> = (0..2000).map(|_| source.sample(&mut rng)).collect();

    let result = run(Estimator::Exponential, &data);
    let mean = result.parameters().unwrap().get("mean").unwrap();
    assert!((mean - 10.0).abs() < 1.0, "mean {mean}");
}

#[test]
fn shifted_estimate_refers_to_original_data() {
    let data = [12.0, 10.0, 30.0, 11.0, 15.0, 13.0, 18.0];
    let stats = StatisticSummary::of(&data);
    let result = Estimator::Exponential.estimate_shifted(&data, &stats, &EstimatorConfig::default());
    assert!(result.success());
    assert!(result.shift() > 0.0 && result.shift() < 10.0);
    assert_eq!(result.data(), &data[..]);
    assert_relative_eq!(result.fitted_data()[1], 10.0 - result.shift());

    let fitted = result.distribution().unwrap();
    assert_eq!(fitted.shift(), result.shift());
    assert_eq!(fitted.cdf(result.shift()), 0.0);
}

#[test]
fn shift_is_skipped_without_check_range() {
    let data = [12.0, 10.0, 30.0, 11.0, 15.0];
    let stats = StatisticSummary::of(&data);
    let result = Estimator::Normal.estimate_shifted(&data, &stats, &EstimatorConfig::default());
    assert_eq!(result.shift(), 0.0);
    assert!(result.shifted().is_none());
}

proptest! {
    #[test]
    fn shift_is_idempotent(values in prop::collection::vec(1u32..1000, 3..40)) {
        let data: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        let estimator = ShiftEstimator::default();
        let shifted = estimator.apply(&data);
        prop_assume!(shifted.is_some());
        let shifted = shifted.unwrap();
        prop_assert!(shifted.shift > 0.0);
        prop_assert!(shifted.data.iter().all(|x| *x > 0.0));
        prop_assert_eq!(estimator.estimate(&shifted.data), 0.0);
    }
}
