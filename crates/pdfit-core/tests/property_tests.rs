//! Property-based tests for the statistics accumulator and distribution adapter

use approx::assert_relative_eq;
use pdfit_core::{quantile_sorted, sorted, Family, FittedDistribution, Parameters, StatisticSummary};
use proptest::prelude::*;

proptest! {
    // The single pass must agree with the textbook two-pass formulas
    #[test]
    fn prop_summary_matches_two_pass(data in prop::collection::vec(-1e3f64..1e3, 2..200)) {
        let summary = StatisticSummary::of(&data);
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

        prop_assert!((summary.mean - mean).abs() <= 1e-9 * (1.0 + mean.abs()));
        prop_assert!((summary.variance.unwrap() - variance).abs() <= 1e-7 * (1.0 + variance));
        prop_assert!(summary.variance.unwrap() >= 0.0);
        prop_assert!(summary.min <= summary.mean && summary.mean <= summary.max);
    }

    // Empirical quantiles are monotone in p and stay within the sample range
    #[test]
    fn prop_quantiles_monotone(data in prop::collection::vec(-50.0f64..50.0, 1..100), p in 0.0f64..1.0, q in 0.0f64..1.0) {
        let s = sorted(&data);
        let (lo, hi) = if p <= q { (p, q) } else { (q, p) };
        prop_assert!(quantile_sorted(&s, lo) <= quantile_sorted(&s, hi));
        prop_assert!(quantile_sorted(&s, lo) >= s[0]);
        prop_assert!(quantile_sorted(&s, hi) <= s[s.len() - 1]);
    }

    // F(F^-1(p)) = p for continuous models
    #[test]
    fn prop_gamma_inverse(shape in 0.5f64..20.0, scale in 0.1f64..10.0, p in 0.01f64..0.99) {
        let params = Parameters::for_family(Family::Gamma, &[shape, scale]).unwrap();
        let fitted = FittedDistribution::from_parameters(Family::Gamma, &params, 0.0).unwrap();
        let x = fitted.inv_cdf(p);
        prop_assert!((fitted.cdf(x) - p).abs() < 1e-6);
    }
}

#[test]
fn test_shift_moves_support() {
    let params = Parameters::for_family(Family::Weibull, &[2.0, 1.0]).unwrap();
    let base = FittedDistribution::from_parameters(Family::Weibull, &params, 0.0).unwrap();
    let shifted = FittedDistribution::from_parameters(Family::Weibull, &params, 5.0).unwrap();

    for &p in &[0.1, 0.5, 0.9] {
        assert_relative_eq!(shifted.inv_cdf(p), base.inv_cdf(p) + 5.0, epsilon = 1e-12);
    }
    assert_relative_eq!(shifted.mean(), base.mean() + 5.0, epsilon = 1e-12);
    assert_relative_eq!(shifted.variance(), base.variance(), epsilon = 1e-12);
    assert_eq!(shifted.to_string(), "5.000000 + Weibull(shape=2.000000, scale=1.000000)");
}
