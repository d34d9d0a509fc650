//! Break point selection and histogram building strategies

use crate::traits::{HistogramBuilder, ProbabilityModel};
use crate::types::Histogram;
use pdfit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Samples smaller than this get the tertile split
pub const SMALL_SAMPLE_SIZE: usize = 15;

/// Default minimum expected count per bin
pub const DEFAULT_MIN_EXPECTED_COUNT: f64 = 5.0;

/// Histogram settings shared by the chi-squared style scorers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// Expected count below which a bin is flagged as sparse
    pub min_expected_count: f64,
    /// Smallest number of bins for samples of at least [`SMALL_SAMPLE_SIZE`]
    pub min_bins: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            min_expected_count: DEFAULT_MIN_EXPECTED_COUNT,
            min_bins: 3,
        }
    }
}

impl HistogramConfig {
    /// Set the sparse-bin threshold
    pub fn with_min_expected_count(mut self, count: f64) -> Self {
        assert!(count > 0.0, "Minimum expected count must be positive");
        self.min_expected_count = count;
        self
    }

    /// Number of equal-probability bins recommended for `sample_size`
    ///
    /// Grows like `2 n^(2/5)` but never leaves fewer than
    /// `min_expected_count` expected observations per bin.
    pub fn recommended_bins(&self, sample_size: usize) -> usize {
        if sample_size < SMALL_SAMPLE_SIZE {
            return 3;
        }
        let n = sample_size as f64;
        let by_growth = (2.0 * n.powf(0.4)).ceil() as usize;
        let by_count = (n / self.min_expected_count).floor() as usize;
        by_growth.min(by_count).max(self.min_bins)
    }
}

/// Interior break points giving bins of equal probability under `inv_cdf`
///
/// Small samples fall back to the tertiles 1/3 and 2/3. Non-finite
/// quantiles and duplicates (common for discrete models) are dropped.
pub fn equalized_break_points<F>(sample_size: usize, inv_cdf: F, config: &HistogramConfig) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let bins = config.recommended_bins(sample_size);
    let mut points: Vec<f64> = (1..bins)
        .map(|i| inv_cdf(i as f64 / bins as f64))
        .filter(|x| x.is_finite())
        .collect();
    points.sort_by(f64::total_cmp);
    points.dedup();
    debug!(sample_size, bins, distinct = points.len(), "equalized break points");
    points
}

/// Prepend `limit` when it lies strictly below every break point
pub fn add_lower_limit(break_points: &[f64], limit: f64) -> Vec<f64> {
    let mut points = break_points.to_vec();
    if points.first().map_or(true, |&first| limit < first) {
        points.insert(0, limit);
    }
    points
}

/// Append `limit` when it lies strictly above every break point
pub fn add_upper_limit(break_points: &[f64], limit: f64) -> Vec<f64> {
    let mut points = break_points.to_vec();
    if points.last().map_or(true, |&last| limit > last) {
        points.push(limit);
    }
    points
}

/// Prepend `-inf` so the first bin captures all mass below the break points
pub fn add_negative_infinity(break_points: &[f64]) -> Vec<f64> {
    add_lower_limit(break_points, f64::NEG_INFINITY)
}

/// Append `+inf` so the last bin captures all mass above the break points
pub fn add_positive_infinity(break_points: &[f64]) -> Vec<f64> {
    add_upper_limit(break_points, f64::INFINITY)
}

/// Histogram over caller-supplied break points
#[derive(Debug, Clone)]
pub struct BreakPointBuilder {
    break_points: Vec<f64>,
}

impl BreakPointBuilder {
    /// Validate and normalise the break points
    pub fn new(break_points: &[f64]) -> Result<Self> {
        let break_points = crate::types::normalize_break_points(break_points)?;
        Ok(Self { break_points })
    }

    /// Extend with `±inf` so that no observation is lost to under/overflow
    pub fn unbounded(break_points: &[f64]) -> Result<Self> {
        Self::new(&add_positive_infinity(&add_negative_infinity(break_points)))
    }

    pub fn break_points(&self) -> &[f64] {
        &self.break_points
    }
}

impl HistogramBuilder for BreakPointBuilder {
    fn build(&self, sample: &[f64]) -> Result<Histogram> {
        let mut histogram = Histogram::from_break_points(&self.break_points)?;
        histogram.collect_all(sample);
        Ok(histogram)
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.break_points.len() - 1)
    }
}

/// Equal-probability histogram for a candidate model
///
/// Interior break points come from [`equalized_break_points`]; the outer
/// limits follow the model's support, using `±inf` where it is unbounded.
/// Integer-valued models get an upper limit one past the support so the
/// largest value has a bin of its own.
pub struct EqualizedBuilder<'a, M: ProbabilityModel + ?Sized> {
    model: &'a M,
    config: HistogramConfig,
}

impl<'a, M: ProbabilityModel + ?Sized> EqualizedBuilder<'a, M> {
    pub fn new(model: &'a M) -> Self {
        Self {
            model,
            config: HistogramConfig::default(),
        }
    }

    pub fn with_config(mut self, config: HistogramConfig) -> Self {
        self.config = config;
        self
    }

    /// Full break point array for a sample of `sample_size` observations
    pub fn break_points(&self, sample_size: usize) -> Result<Vec<f64>> {
        let interior = equalized_break_points(sample_size, |p| self.model.inv_cdf(p), &self.config);
        let domain = self.model.domain();
        if domain.lower.is_nan() || domain.upper.is_nan() {
            return Err(Error::InvalidInput("model support is undefined".to_string()));
        }

        let with_lower = if domain.lower.is_finite() {
            add_lower_limit(&interior, domain.lower)
        } else {
            add_negative_infinity(&interior)
        };
        let upper = if domain.upper.is_finite() && self.model.is_discrete() {
            domain.upper + 1.0
        } else {
            domain.upper
        };
        let points = if upper.is_finite() {
            add_upper_limit(&with_lower, upper)
        } else {
            add_positive_infinity(&with_lower)
        };
        crate::types::normalize_break_points(&points)
    }
}

impl<M: ProbabilityModel + ?Sized> HistogramBuilder for EqualizedBuilder<'_, M> {
    fn build(&self, sample: &[f64]) -> Result<Histogram> {
        if sample.is_empty() {
            return Err(Error::empty_input("equalized histogram"));
        }
        let mut histogram = Histogram::from_break_points(&self.break_points(sample.len())?)?;
        histogram.collect_all(sample);
        Ok(histogram)
    }
}
