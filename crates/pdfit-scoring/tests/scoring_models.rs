//! Scoring models on simulated data

use approx::assert_relative_eq;
use pdfit_confidence::Bootstrap;
use pdfit_core::StatisticSummary;
use pdfit_estimate::{Estimator, EstimatorConfig, ParameterEstimator};
use pdfit_histogram::HistogramConfig;
use pdfit_scoring::models::{
    AicModel, AndersonDarlingModel, BicModel, ChiSquaredModel, MallowsL2Model, ParameterMseModel, QqSseModel,
};
use pdfit_scoring::{gof, Candidate, GofTest, Metric, Score, Scorer, ScoringModel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};

fn exponential_sample(n: usize, seed: u64) -> Vec<f64> {
    let source = Exp::new(0.5).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| source.sample(&mut rng)).collect()
}

fn candidate(estimator: Estimator, data: &[f64]) -> Candidate {
    let result = estimator.estimate(data, &StatisticSummary::of(data), &EstimatorConfig::default());
    Candidate::new(estimator, result).expect("estimation should succeed")
}

#[test]
fn true_family_scores_better() {
    let data = exponential_sample(500, 11);
    let exponential = candidate(Estimator::Exponential, &data);
    let normal = candidate(Estimator::Normal, &data);

    for model in [
        Box::new(AndersonDarlingModel) as Box<dyn ScoringModel>,
        Box::new(QqSseModel),
        Box::new(AicModel),
        Box::new(BicModel),
        Box::new(ChiSquaredModel::default()),
    ] {
        let good = model.score(&data, &exponential);
        let bad = model.score(&data, &normal);
        assert!(good.valid, "{}", model.metric());
        assert!(
            model.metric().is_better(good.value, bad.value),
            "{}: {} vs {}",
            model.metric(),
            good.value,
            bad.value
        );
    }
}

#[test]
fn mallows_is_normalised_qq() {
    let data = exponential_sample(100, 3);
    let fitted = candidate(Estimator::Exponential, &data);
    let qq = QqSseModel.score(&data, &fitted).value;
    let l2 = MallowsL2Model.score(&data, &fitted).value;
    assert_relative_eq!(l2 * l2 * 100.0, qq, max_relative = 1e-10);
}

#[test]
fn chi_squared_without_degrees_of_freedom_is_invalid() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    let normal = candidate(Estimator::Normal, &data);
    let score = ChiSquaredModel::default().score(&data, &normal);
    assert!(!score.valid);
    assert_eq!(score.value, Metric::ChiSquared.worst_value());
    assert!(gof::chi_squared_test(&data, &normal, &HistogramConfig::default()).is_none());
}

#[test]
fn empty_data_scores_are_invalid() {
    let data = exponential_sample(50, 5);
    let fitted = candidate(Estimator::Exponential, &data);
    let score = AndersonDarlingModel.score(&[], &fitted);
    assert_eq!(score, Score::invalid(Metric::AndersonDarling));
}

#[test]
fn goodness_of_fit_p_values() {
    let data = exponential_sample(500, 21);
    let exponential = candidate(Estimator::Exponential, &data);
    let normal = candidate(Estimator::Normal, &data);
    let config = HistogramConfig::default();

    let good = gof::goodness_of_fit(&data, &exponential, &config);
    assert_eq!(good.len(), 5);
    assert_eq!(good[0].test, GofTest::ChiSquared);
    assert!(good[0].degrees_of_freedom.unwrap() > 1);
    for test in &good {
        assert!((0.0..=1.0).contains(&test.p_value), "{test}");
    }

    let bad = gof::edf_tests(&data, &normal);
    let ad = bad.iter().find(|t| t.test == GofTest::AndersonDarling).unwrap();
    assert!(ad.rejects(0.01), "{ad}");
}

#[test]
fn parameter_mse_tracks_standard_error() {
    let data = exponential_sample(200, 8);
    let fitted = candidate(Estimator::Exponential, &data);
    let model = ParameterMseModel::new(
        Bootstrap::default().with_resamples(100).with_seed(1),
        EstimatorConfig::default(),
    );
    let score = model.score(&data, &fitted);
    assert!(score.valid);
    // standard error of the mean is 2 / √200 ≈ 0.14
    assert!(score.value > 0.05 && score.value < 0.3, "{}", score.value);
}

#[test]
fn scorer_keeps_metric_order() {
    let scorer = Scorer::for_metrics(
        &[Metric::QqSse, Metric::AndersonDarling],
        HistogramConfig::default(),
        &ParameterMseModel::default(),
    )
    .with_model(Box::new(AicModel))
    .with_model(Box::new(QqSseModel));
    assert_eq!(scorer.metrics(), vec![Metric::QqSse, Metric::AndersonDarling, Metric::Aic]);

    let data = exponential_sample(80, 2);
    let results = scorer.score_all(
        &data,
        vec![candidate(Estimator::Exponential, &data), candidate(Estimator::Uniform, &data)],
    );
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].label(), "Exponential MLE");
    assert_eq!(results[1].scores.len(), 3);
    assert!(results[0].score(Metric::Aic).is_some());
}
