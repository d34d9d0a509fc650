//! Successfully estimated distributions offered for scoring

use pdfit_core::{Family, FittedDistribution};
use pdfit_estimate::{EstimationResult, Estimator, ParameterEstimator};

/// A fitted distribution together with the estimation that produced it
#[derive(Debug, Clone)]
pub struct Candidate {
    estimator: Estimator,
    estimation: EstimationResult,
    distribution: FittedDistribution,
}

impl Candidate {
    /// `None` unless the estimation succeeded and its parameters build a
    /// distribution
    pub fn new(estimator: Estimator, estimation: EstimationResult) -> Option<Self> {
        let distribution = estimation.distribution()?;
        Some(Self {
            estimator,
            estimation,
            distribution,
        })
    }

    /// Display name, e.g. "Gamma MLE"
    pub fn label(&self) -> &'static str {
        self.estimator.name()
    }

    pub fn estimator(&self) -> Estimator {
        self.estimator
    }

    pub fn family(&self) -> Family {
        self.distribution.family()
    }

    pub fn estimation(&self) -> &EstimationResult {
        &self.estimation
    }

    pub fn distribution(&self) -> &FittedDistribution {
        &self.distribution
    }

    /// Number of estimated parameters, counting a non-zero shift
    pub fn parameter_count(&self) -> usize {
        let shift = usize::from(self.distribution.shift() != 0.0);
        self.family().parameter_count() + shift
    }
}
