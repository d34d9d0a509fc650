//! Scores computed on an equal-probability histogram of the sample

use crate::candidate::Candidate;
use crate::traits::ScoringModel;
use crate::types::Metric;
use pdfit_histogram::{EqualizedBuilder, Histogram, HistogramBuilder, HistogramConfig, HistogramOps};
use tracing::debug;

/// Histogram of `data` over break points equalized under the candidate
pub fn fitted_histogram(data: &[f64], candidate: &Candidate, config: &HistogramConfig) -> Option<Histogram> {
    EqualizedBuilder::new(candidate.distribution())
        .with_config(*config)
        .build(data)
        .ok()
}

/// Pearson chi-squared statistic
///
/// Invalid when fewer than one degree of freedom (`bins - 1 - k`) remains.
/// Bins whose expected count is at most the configured minimum are logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChiSquaredModel {
    config: HistogramConfig,
}

impl ChiSquaredModel {
    pub fn new(config: HistogramConfig) -> Self {
        Self { config }
    }

    /// Degrees of freedom left after estimating `parameters` values
    pub fn degrees_of_freedom(bins: usize, parameters: usize) -> Option<usize> {
        bins.checked_sub(1 + parameters).filter(|&dof| dof >= 1)
    }
}

impl ScoringModel for ChiSquaredModel {
    fn metric(&self) -> Metric {
        Metric::ChiSquared
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        let histogram = fitted_histogram(data, candidate, &self.config)?;
        let Some(dof) = Self::degrees_of_freedom(histogram.len(), candidate.parameter_count()) else {
            debug!(bins = histogram.len(), candidate = candidate.label(), "no degrees of freedom left");
            return None;
        };
        let distribution = candidate.distribution();
        let sparse = histogram.sparse_bins(distribution, self.config.min_expected_count);
        if !sparse.is_empty() {
            debug!(
                candidate = candidate.label(),
                sparse = sparse.len(),
                bins = histogram.len(),
                "bins with small expected counts"
            );
        }
        let statistic = histogram.chi_squared_statistic(distribution);
        debug!(statistic, dof, candidate = candidate.label(), "chi-squared");
        Some(statistic)
    }
}

/// Sum of squared differences between observed bin fractions and model
/// bin probabilities
#[derive(Debug, Clone, Copy, Default)]
pub struct SseModel {
    config: HistogramConfig,
}

impl SseModel {
    pub fn new(config: HistogramConfig) -> Self {
        Self { config }
    }
}

impl ScoringModel for SseModel {
    fn metric(&self) -> Metric {
        Metric::Sse
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        let histogram = fitted_histogram(data, candidate, &self.config)?;
        Some(histogram.sum_squared_error(candidate.distribution()))
    }
}
