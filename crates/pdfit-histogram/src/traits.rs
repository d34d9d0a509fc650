//! Core traits for histogram building

use crate::types::Histogram;
use pdfit_core::{FittedDistribution, Interval, Result};

/// Trait for building histograms from sample data
pub trait HistogramBuilder {
    /// Build a histogram from the given sample
    fn build(&self, sample: &[f64]) -> Result<Histogram>;

    /// Build a histogram from pre-sorted data
    ///
    /// Default implementation just calls build().
    fn build_sorted(&self, sorted_sample: &[f64]) -> Result<Histogram> {
        self.build(sorted_sample)
    }

    /// Get the target number of bins (if known)
    fn target_bins(&self) -> Option<usize> {
        None
    }
}

/// The part of a distribution a histogram needs: mass below a point,
/// quantiles and support
pub trait ProbabilityModel {
    /// `P(X < x)`
    fn prob_below(&self, x: f64) -> f64;

    /// `P(X <= x)`
    fn cdf(&self, x: f64) -> f64;

    /// Inverse cumulative distribution function
    fn inv_cdf(&self, p: f64) -> f64;

    /// Support of the distribution
    fn domain(&self) -> Interval;

    /// Whether the model is integer valued
    fn is_discrete(&self) -> bool {
        false
    }
}

impl ProbabilityModel for FittedDistribution {
    fn prob_below(&self, x: f64) -> f64 {
        FittedDistribution::prob_below(self, x)
    }

    fn cdf(&self, x: f64) -> f64 {
        FittedDistribution::cdf(self, x)
    }

    fn inv_cdf(&self, p: f64) -> f64 {
        FittedDistribution::inv_cdf(self, p)
    }

    fn domain(&self) -> Interval {
        FittedDistribution::domain(self)
    }

    fn is_discrete(&self) -> bool {
        FittedDistribution::is_discrete(self)
    }
}
