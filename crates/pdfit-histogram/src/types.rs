//! Core types for histogram representation

use crate::traits::ProbabilityModel;
use pdfit_core::{Error, Result};
use serde::Serialize;
use std::fmt;

/// A single bin in a histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Left edge of the bin (inclusive)
    pub left: f64,
    /// Right edge of the bin (exclusive, except for the last bin)
    pub right: f64,
    /// Number of values in this bin
    pub count: usize,
}

impl HistogramBin {
    /// Create a new, empty histogram bin
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right, count: 0 }
    }

    /// Get the center point of the bin
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Get the width of the bin
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Check if a value falls within this bin
    pub fn contains(&self, value: f64) -> bool {
        value >= self.left && value < self.right
    }

    /// Get the relative frequency (count / total_count)
    pub fn frequency(&self, total_count: usize) -> f64 {
        if total_count > 0 {
            self.count as f64 / total_count as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}): count={}", self.left, self.right, self.count)
    }
}

/// Sort break points ascending and drop duplicates
///
/// Fails on NaN break points or when fewer than two distinct points remain,
/// since no bin can then be formed.
pub fn normalize_break_points(break_points: &[f64]) -> Result<Vec<f64>> {
    if break_points.iter().any(|b| b.is_nan()) {
        return Err(Error::InvalidInput("break points must not contain NaN".to_string()));
    }
    let mut points = break_points.to_vec();
    points.sort_by(f64::total_cmp);
    points.dedup();
    if points.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: points.len(),
        });
    }
    Ok(points)
}

/// A histogram over fixed break points
///
/// Bins are `[b_i, b_{i+1})` except the last, which also holds its right
/// edge. Observations outside the break points are tallied as underflow or
/// overflow, so `bin_counts().sum() + underflow + overflow == total_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The bins that make up the histogram
    bins: Vec<HistogramBin>,
    /// Total number of data points collected
    total_count: usize,
    underflow: usize,
    overflow: usize,
    /// Minimum value collected
    min: f64,
    /// Maximum value collected
    max: f64,
}

impl Histogram {
    /// Create an empty histogram from break points
    ///
    /// Break points are sorted and de-duplicated first; zero-width bins can
    /// therefore never occur.
    pub fn from_break_points(break_points: &[f64]) -> Result<Self> {
        let points = normalize_break_points(break_points)?;
        let bins = points
            .windows(2)
            .map(|w| HistogramBin::new(w[0], w[1]))
            .collect();
        Ok(Self {
            bins,
            total_count: 0,
            underflow: 0,
            overflow: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        })
    }

    /// Tally one observation
    pub fn collect(&mut self, x: f64) {
        self.total_count += 1;
        self.min = self.min.min(x);
        self.max = self.max.max(x);
        match self.find_bin(x) {
            Some(idx) => self.bins[idx].count += 1,
            None if x < self.lower_limit() => self.underflow += 1,
            None => self.overflow += 1,
        }
    }

    /// Tally every observation of `sample`
    pub fn collect_all(&mut self, sample: &[f64]) {
        for &x in sample {
            self.collect(x);
        }
    }

    /// Reset all counts, keeping the break points
    pub fn reset(&mut self) {
        for bin in &mut self.bins {
            bin.count = 0;
        }
        self.total_count = 0;
        self.underflow = 0;
        self.overflow = 0;
        self.min = f64::INFINITY;
        self.max = f64::NEG_INFINITY;
    }

    /// Get the bins
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Get the total count of data points, including under- and overflow
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Observations below the first break point
    pub fn underflow(&self) -> usize {
        self.underflow
    }

    /// Observations above the last break point
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// First break point
    pub fn lower_limit(&self) -> f64 {
        self.bins.first().map_or(f64::NAN, |b| b.left)
    }

    /// Last break point
    pub fn upper_limit(&self) -> f64 {
        self.bins.last().map_or(f64::NAN, |b| b.right)
    }

    /// Find which bin contains a given value
    pub fn find_bin(&self, value: f64) -> Option<usize> {
        if value.is_nan() || self.bins.is_empty() {
            return None;
        }
        // Handle last bin specially (includes right boundary)
        let last_idx = self.bins.len() - 1;
        if value == self.bins[last_idx].right {
            return Some(last_idx);
        }
        if value < self.lower_limit() || value > self.upper_limit() {
            return None;
        }
        let idx = self.bins.partition_point(|bin| bin.right <= value);
        (idx < self.bins.len()).then_some(idx)
    }

    /// Observed count of each bin
    pub fn bin_counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// Fraction of all collected observations falling in each bin
    pub fn bin_fractions(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|bin| bin.frequency(self.total_count))
            .collect()
    }

    /// Get bin edges (including rightmost edge)
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|bin| bin.left).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.right);
        }
        edges
    }

    /// Probability mass `model` assigns to each bin
    pub fn bin_probabilities<M: ProbabilityModel + ?Sized>(&self, model: &M) -> Vec<f64> {
        let last_idx = self.bins.len().saturating_sub(1);
        self.bins
            .iter()
            .enumerate()
            .map(|(i, bin)| {
                let below_left = if bin.left == f64::NEG_INFINITY { 0.0 } else { model.prob_below(bin.left) };
                let upto_right = if bin.right == f64::INFINITY {
                    1.0
                } else if i == last_idx {
                    model.cdf(bin.right)
                } else {
                    model.prob_below(bin.right)
                };
                (upto_right - below_left).max(0.0)
            })
            .collect()
    }

    /// Underflow and overflow cells: `[(underflow, P(X < lower)), (overflow, P(X > upper))]`
    ///
    /// Together with the bins these partition the real line, so observed
    /// counts sum to `total_count` and probabilities to one.
    pub fn tail_cells<M: ProbabilityModel + ?Sized>(&self, model: &M) -> [(usize, f64); 2] {
        if self.bins.is_empty() {
            return [(self.underflow, 0.0), (self.overflow, 0.0)];
        }
        let lower = self.lower_limit();
        let upper = self.upper_limit();
        let below = if lower == f64::NEG_INFINITY { 0.0 } else { model.prob_below(lower) };
        let above = if upper == f64::INFINITY { 0.0 } else { 1.0 - model.cdf(upper) };
        [(self.underflow, below.max(0.0)), (self.overflow, above.max(0.0))]
    }

    /// Expected counts under `model`: bin probability times total count
    pub fn expected_counts<M: ProbabilityModel + ?Sized>(&self, model: &M) -> Vec<f64> {
        let n = self.total_count as f64;
        self.bin_probabilities(model).into_iter().map(|p| p * n).collect()
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, n={}, underflow={}, overflow={})",
            self.len(),
            self.total_count,
            self.underflow,
            self.overflow
        )
    }
}
