//! Parameter quality from the bootstrap

use crate::candidate::Candidate;
use crate::traits::ScoringModel;
use crate::types::Metric;
use pdfit_confidence::Bootstrap;
use pdfit_core::StatisticSummary;
use pdfit_estimate::{EstimatorConfig, ParameterEstimator};
use tracing::debug;

/// Seed used when no bootstrap seed is configured, so that every candidate
/// sees the same resamples
pub const DEFAULT_BOOTSTRAP_SEED: u64 = 0x5eed;

/// `√Σ MSE` of the candidate's parameters under bootstrap re-estimation
///
/// The data the estimator actually saw (after any shift) is resampled and
/// the same estimator is re-run on every resample. Resamples on which the
/// estimator fails are skipped.
#[derive(Debug, Clone)]
pub struct ParameterMseModel {
    bootstrap: Bootstrap,
    config: EstimatorConfig,
}

impl Default for ParameterMseModel {
    fn default() -> Self {
        Self::new(Bootstrap::default().with_seed(DEFAULT_BOOTSTRAP_SEED), EstimatorConfig::default())
    }
}

impl ParameterMseModel {
    pub fn new(bootstrap: Bootstrap, config: EstimatorConfig) -> Self {
        Self { bootstrap, config }
    }

    pub fn bootstrap(&self) -> &Bootstrap {
        &self.bootstrap
    }
}

impl ScoringModel for ParameterMseModel {
    fn metric(&self) -> Metric {
        Metric::ParameterMse
    }

    fn statistic(&self, _data: &[f64], candidate: &Candidate) -> Option<f64> {
        let estimation = candidate.estimation();
        let parameters = estimation.parameters()?;
        let names: Vec<&'static str> = parameters.names().collect();
        let estimator = candidate.estimator();

        let result = self
            .bootstrap
            .parameter_estimates(estimation.fitted_data(), &names, &parameters.values(), |sample| {
                let stats = StatisticSummary::of(sample);
                let result = estimator.estimate(sample, &stats, &self.config);
                if result.success() {
                    result.parameters().map(|p| p.values())
                } else {
                    None
                }
            })
            .ok()?;
        debug!(
            candidate = candidate.label(),
            failed = result.n_failed,
            mse = result.root_sum_mse(),
            "bootstrap parameter MSE"
        );
        Some(result.root_sum_mse())
    }
}
