//! Single-pass summary statistics
//!
//! [`Statistic`] is a Welford-style accumulator that tracks the moments every
//! estimator needs, so the sample is scanned once and the resulting
//! [`StatisticSummary`] is shared by all of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Running accumulator of count, moments, extremes and lag-1 products
#[derive(Debug, Clone, Default)]
pub struct Statistic {
    count: usize,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
    min: f64,
    max: f64,
    sum: f64,
    first: f64,
    last: f64,
    lag_products: f64,
}

impl Statistic {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            ..Default::default()
        }
    }

    /// Accumulate every value of `data`
    pub fn from_slice(data: &[f64]) -> Self {
        let mut stat = Self::new();
        stat.collect_all(data);
        stat
    }

    /// Add one observation
    pub fn collect(&mut self, x: f64) {
        let n1 = self.count as f64;
        self.count += 1;
        let n = self.count as f64;

        let delta = x - self.mean;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        self.mean += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;

        if self.count == 1 {
            self.first = x;
        } else {
            self.lag_products += self.last * x;
        }
        self.last = x;
        self.sum += x;
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Add a batch of observations
    pub fn collect_all(&mut self, data: &[f64]) {
        for &x in data {
            self.collect(x);
        }
    }

    /// Number of observations collected so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Snapshot of the accumulated statistics
    pub fn summary(&self) -> StatisticSummary {
        let n = self.count as f64;
        let variance = if self.count >= 2 {
            Some((self.m2 / (n - 1.0)).max(0.0))
        } else {
            None
        };

        let spread = self.m2 > 0.0;
        let skewness = (self.count >= 3 && spread).then(|| n.sqrt() * self.m3 / self.m2.powf(1.5));
        let kurtosis = (self.count >= 4 && spread).then(|| n * self.m4 / (self.m2 * self.m2) - 3.0);

        let lag1_correlation = (self.count >= 2 && spread).then(|| {
            let m = self.mean;
            let numerator = self.lag_products - m * (2.0 * self.sum - self.first - self.last)
                + (n - 1.0) * m * m;
            numerator / self.m2
        });

        StatisticSummary {
            count: self.count,
            mean: if self.count > 0 { self.mean } else { f64::NAN },
            variance,
            min: self.min,
            max: self.max,
            skewness,
            kurtosis,
            lag1_correlation,
        }
    }
}

/// Immutable summary of a sample
///
/// `variance` uses the n-1 denominator and is `None` when fewer than two
/// observations were seen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticSummary {
    pub count: usize,
    pub mean: f64,
    pub variance: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub lag1_correlation: Option<f64>,
}

impl StatisticSummary {
    /// Summarise a sample in one pass
    pub fn of(data: &[f64]) -> Self {
        Statistic::from_slice(data).summary()
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> Option<f64> {
        self.variance.map(f64::sqrt)
    }

    /// Range `max - min`, zero for empty samples
    pub fn range(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// True when the sample holds at least one value and all values are equal
    pub fn all_equal(&self) -> bool {
        self.count > 0 && self.max == self.min
    }

    /// True when some observation is strictly below `bound`
    pub fn has_values_below(&self, bound: f64) -> bool {
        self.count > 0 && self.min < bound
    }
}

impl fmt::Display for StatisticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={}, mean={:.4}, var={}, range=[{:.4}, {:.4}]",
            self.count,
            self.mean,
            self.variance
                .map(|v| format!("{v:.4}"))
                .unwrap_or_else(|| "undefined".to_string()),
            self.min,
            self.max
        )
    }
}

/// Sorted copy of the data (NaN values sort last)
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Empirical quantile of sorted data by linear interpolation between order
/// statistics (Hyndman–Fan type 7)
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n as f64 - 1.0) * p.clamp(0.0, 1.0);
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}

/// Median of sorted data
pub fn median_sorted(sorted: &[f64]) -> f64 {
    quantile_sorted(sorted, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_moments() {
        let summary = StatisticSummary::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(summary.count, 8);
        assert_relative_eq!(summary.mean, 5.0);
        assert_relative_eq!(summary.variance.unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_relative_eq!(summary.range(), 7.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = StatisticSummary::of(&[]);
        assert_eq!(empty.count, 0);
        assert!(empty.variance.is_none());
        assert!(!empty.all_equal());

        let single = StatisticSummary::of(&[3.0]);
        assert!(single.variance.is_none());

        let constant = StatisticSummary::of(&[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(constant.variance, Some(0.0));
        assert!(constant.all_equal());
        assert!(constant.skewness.is_none());

        let negative = StatisticSummary::of(&[-1.0, 2.0, 3.0]);
        assert!(negative.has_values_below(0.0));
        assert_relative_eq!(negative.mean, 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_higher_moments_match_two_pass() {
        let data = [1.0, 2.0, 2.5, 3.0, 7.0, 11.0, 0.5, 4.0];
        let summary = StatisticSummary::of(&data);
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let m2: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
        let m3: f64 = data.iter().map(|x| (x - mean).powi(3)).sum();
        let m4: f64 = data.iter().map(|x| (x - mean).powi(4)).sum();

        assert_relative_eq!(summary.skewness.unwrap(), n.sqrt() * m3 / m2.powf(1.5), epsilon = 1e-10);
        assert_relative_eq!(summary.kurtosis.unwrap(), n * m4 / (m2 * m2) - 3.0, epsilon = 1e-10);

        let lag: f64 = data.windows(2).map(|w| (w[0] - mean) * (w[1] - mean)).sum();
        assert_relative_eq!(summary.lag1_correlation.unwrap(), lag / m2, epsilon = 1e-10);
    }

    #[test]
    fn test_quantiles() {
        let data = sorted(&[5.0, 1.0, 4.0, 2.0, 3.0]);
        assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_relative_eq!(median_sorted(&data), 3.0);
        assert_relative_eq!(quantile_sorted(&data, 0.25), 2.0);
        assert_relative_eq!(quantile_sorted(&data, 0.1), 1.4);
        assert_relative_eq!(quantile_sorted(&data, 1.0), 5.0);
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }
}
