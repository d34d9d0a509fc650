//! The estimator contract

use crate::config::EstimatorConfig;
use crate::shift::ShiftEstimator;
use crate::types::{EstimationFailure, EstimationResult, ParameterFit};
use pdfit_core::{Family, StatisticSummary};
use std::sync::Arc;
use tracing::debug;

/// A parameter estimator for one distribution family
///
/// Implementations are pure: the same sample, summary and configuration
/// always give the same result, and bad data is reported through
/// [`EstimationFailure`] rather than errors or panics.
pub trait ParameterEstimator: Send + Sync {
    /// Human readable estimator name, e.g. "Gamma MLE"
    fn name(&self) -> &'static str;

    /// Family whose parameters are produced
    fn family(&self) -> Family;

    /// Whether the data should be shifted to start at zero before fitting
    fn check_range(&self) -> bool {
        false
    }

    /// Estimate parameters from `data` and its precomputed summary
    fn fit(
        &self,
        data: &[f64],
        statistics: &StatisticSummary,
        config: &EstimatorConfig,
    ) -> Result<ParameterFit, EstimationFailure>;

    /// Estimate and wrap the outcome in an [`EstimationResult`]
    fn estimate(&self, data: &[f64], statistics: &StatisticSummary, config: &EstimatorConfig) -> EstimationResult {
        let outcome = if data.iter().any(|x| !x.is_finite()) {
            Err(EstimationFailure::NonFinite)
        } else {
            self.fit(data, statistics, config)
        };
        EstimationResult::new(self.name(), self.family(), Arc::from(data), *statistics, outcome)
    }

    /// Estimate on shifted data when [`check_range`](Self::check_range) asks
    /// for it and a non-zero shift is found
    ///
    /// The returned result refers to the original sample and carries the
    /// shift so the final distribution is `shift + fitted`.
    fn estimate_shifted(&self, data: &[f64], statistics: &StatisticSummary, config: &EstimatorConfig) -> EstimationResult {
        if !self.check_range() {
            return self.estimate(data, statistics, config);
        }
        let Some(shifted) = ShiftEstimator::new(config.zero_tolerance).apply(data) else {
            return self.estimate(data, statistics, config);
        };
        debug!(estimator = self.name(), shift = shifted.shift, "fitting shifted data");
        let shifted_stats = StatisticSummary::of(&shifted.data);
        let outcome = self.fit(&shifted.data, &shifted_stats, config);
        EstimationResult::new(self.name(), self.family(), Arc::from(data), *statistics, outcome).with_shift(shifted)
    }
}
