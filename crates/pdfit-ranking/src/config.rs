//! Metric weights

use pdfit_scoring::Metric;
use serde::Serialize;
use std::collections::BTreeMap;

/// Weights of the metrics in the overall value
///
/// Metrics without an explicit weight get `1.0`. Weights are normalised over
/// the metrics actually scored, so only their ratios matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankingConfig {
    weights: BTreeMap<Metric, f64>,
}

impl RankingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of one metric
    ///
    /// # Panics
    /// If `weight` is negative or not finite
    pub fn with_weight(mut self, metric: Metric, weight: f64) -> Self {
        assert!(
            weight.is_finite() && weight >= 0.0,
            "metric weight must be finite and non-negative"
        );
        self.weights.insert(metric, weight);
        self
    }

    pub fn with_weights(self, weights: impl IntoIterator<Item = (Metric, f64)>) -> Self {
        weights
            .into_iter()
            .fold(self, |config, (metric, weight)| config.with_weight(metric, weight))
    }

    pub fn weight(&self, metric: Metric) -> f64 {
        self.weights.get(&metric).copied().unwrap_or(1.0)
    }

    /// Weights for `metrics` scaled to sum to one
    ///
    /// Falls back to equal weights when every weight is zero.
    pub fn normalised(&self, metrics: &[Metric]) -> Vec<f64> {
        if metrics.is_empty() {
            return Vec::new();
        }
        let raw: Vec<f64> = metrics.iter().map(|&m| self.weight(m)).collect();
        let total: f64 = raw.iter().sum();
        if total > 0.0 {
            raw.into_iter().map(|w| w / total).collect()
        } else {
            vec![1.0 / metrics.len() as f64; metrics.len()]
        }
    }
}
