//! Property-based tests for the EDF statistics

use pdfit_core::StatisticSummary;
use pdfit_estimate::{Estimator, EstimatorConfig, ParameterEstimator};
use pdfit_scoring::models::{AndersonDarlingModel, CramerVonMisesModel, WatsonModel};
use pdfit_scoring::{gof, Candidate, GofTest, ScoringModel};
use proptest::prelude::*;

fn standard_candidate() -> Candidate {
    let reference = [-2.0, -1.2, -0.5, 0.0, 0.4, 1.1, 1.9, 2.6];
    let result = Estimator::Normal.estimate(&reference, &StatisticSummary::of(&reference), &EstimatorConfig::default());
    Candidate::new(Estimator::Normal, result).expect("normal fit of a spread sample")
}

fn sample_and_permutation() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec(-10.0f64..10.0, 2..80).prop_flat_map(|data| (Just(data.clone()), Just(data).prop_shuffle()))
}

proptest! {
    // The statistics depend on the order statistics only
    #[test]
    fn prop_statistics_ignore_order((data, permuted) in sample_and_permutation()) {
        let candidate = standard_candidate();
        let models: [&dyn ScoringModel; 3] = [&AndersonDarlingModel, &CramerVonMisesModel, &WatsonModel];
        for model in models {
            prop_assert_eq!(model.statistic(&data, &candidate), model.statistic(&permuted, &candidate));
        }
    }

    // A² ≥ 0, W² ≥ 1/(12n) and 0 ≤ U² ≤ W²
    #[test]
    fn prop_statistics_are_bounded_below((data, _) in sample_and_permutation()) {
        let candidate = standard_candidate();
        let n = data.len() as f64;
        let a2 = AndersonDarlingModel.statistic(&data, &candidate).unwrap();
        let w2 = CramerVonMisesModel.statistic(&data, &candidate).unwrap();
        let u2 = WatsonModel.statistic(&data, &candidate).unwrap();

        prop_assert!(a2 >= -1e-9);
        prop_assert!(w2 >= 1.0 / (12.0 * n) - 1e-12);
        prop_assert!(u2 >= -1e-12);
        prop_assert!(u2 <= w2 + 1e-12);
    }

    // Every test reports a p-value in [0, 1] and KS stays in [0, 1]
    #[test]
    fn prop_p_values_are_probabilities((data, _) in sample_and_permutation()) {
        let candidate = standard_candidate();
        for test in gof::edf_tests(&data, &candidate) {
            prop_assert!((0.0..=1.0).contains(&test.p_value), "{}", test);
            if test.test == GofTest::KolmogorovSmirnov {
                prop_assert!(test.statistic > 0.0 && test.statistic <= 1.0);
            }
        }
    }
}
