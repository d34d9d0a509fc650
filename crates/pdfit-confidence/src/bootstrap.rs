//! Bootstrap engine for parameter estimators
//!
//! Resamples the data with replacement, re-runs an estimator on every
//! resample and summarises each parameter's bootstrap distribution by its
//! bias, variance, mean squared error and a confidence interval.
//!
//! Resample `i` draws from its own `StdRng` seeded with `seed + i`, so the
//! result depends only on the seed and never on the execution strategy.

use crate::methods::{BootstrapMethod, PercentileBootstrap};
use crate::types::{ConfidenceInterval, ConfidenceLevel};
use pdfit_core::{Error, ExecutionStrategy, Result};
use rand::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument, warn};

/// Default number of bootstrap resamples
pub const DEFAULT_RESAMPLES: usize = 399;

/// Default confidence level of the reported intervals
pub const DEFAULT_CONFIDENCE_LEVEL: ConfidenceLevel = ConfidenceLevel::NINETY_FIVE;

/// Bootstrap summary of one estimated parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapEstimate {
    pub name: &'static str,
    /// Estimate on the full sample
    pub original: f64,
    /// Mean of the bootstrap replicates
    pub mean: f64,
    /// Variance of the replicates about their mean (divisor `B`)
    pub variance: f64,
    /// `mean - original`
    pub bias: f64,
    /// `variance + bias²`, i.e. the mean of `(θ* - θ)²`
    pub mse: f64,
    pub interval: ConfidenceInterval,
}

impl BootstrapEstimate {
    /// Summarise replicates of a single parameter
    pub fn from_replicates<M: BootstrapMethod>(
        name: &'static str,
        original: f64,
        replicates: &[f64],
        method: &M,
        confidence_level: ConfidenceLevel,
    ) -> Result<Self> {
        if replicates.is_empty() {
            return Err(Error::empty_input("bootstrap replicates"));
        }
        let b = replicates.len() as f64;
        let mean = replicates.iter().sum::<f64>() / b;
        let variance = replicates.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / b;
        let bias = mean - original;
        let interval = method.calculate_interval(replicates, original, confidence_level)?;
        Ok(Self {
            name,
            original,
            mean,
            variance,
            bias,
            mse: variance + bias * bias,
            interval,
        })
    }

    pub fn std_error(&self) -> f64 {
        self.variance.sqrt()
    }
}

impl fmt::Display for BootstrapEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.6} (bias {:.6}, mse {:.6}), {}",
            self.name, self.original, self.bias, self.mse, self.interval
        )
    }
}

/// Result of a bootstrap run over every parameter of an estimator
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResult {
    pub estimates: Vec<BootstrapEstimate>,
    /// Resamples attempted
    pub n_resamples: usize,
    /// Resamples whose estimator returned no usable parameters
    pub n_failed: usize,
    /// Seed the resample streams were derived from
    pub seed: u64,
}

impl BootstrapResult {
    pub fn get(&self, name: &str) -> Option<&BootstrapEstimate> {
        self.estimates.iter().find(|e| e.name == name)
    }

    /// `√Σ mse` over all parameters
    pub fn root_sum_mse(&self) -> f64 {
        self.estimates.iter().map(|e| e.mse).sum::<f64>().sqrt()
    }

    pub fn successful_resamples(&self) -> usize {
        self.n_resamples - self.n_failed
    }
}

/// Bootstrap engine
#[derive(Debug, Clone)]
pub struct Bootstrap<M = PercentileBootstrap> {
    method: M,
    n_resamples: usize,
    confidence_level: ConfidenceLevel,
    seed: Option<u64>,
    strategy: ExecutionStrategy,
}

impl Default for Bootstrap<PercentileBootstrap> {
    fn default() -> Self {
        Self::new(PercentileBootstrap)
    }
}

impl<M: BootstrapMethod> Bootstrap<M> {
    pub fn new(method: M) -> Self {
        Self {
            method,
            n_resamples: DEFAULT_RESAMPLES,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seed: None,
            strategy: ExecutionStrategy::default(),
        }
    }

    /// Set the number of bootstrap resamples
    pub fn with_resamples(mut self, n_resamples: usize) -> Self {
        assert!(n_resamples > 0, "Number of resamples must be positive");
        self.n_resamples = n_resamples;
        self
    }

    /// Set the confidence level
    ///
    /// Plain `f64` levels are validated by [`ConfidenceLevel::new`].
    pub fn with_confidence_level(mut self, confidence_level: impl Into<ConfidenceLevel>) -> Self {
        self.confidence_level = confidence_level.into();
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn method(&self) -> &M {
        &self.method
    }

    pub fn n_resamples(&self) -> usize {
        self.n_resamples
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Resample `i` drawn with replacement from `data`
    fn resample(data: &[f64], seed: u64, i: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        (0..data.len()).map(|_| data[rng.gen_range(0..data.len())]).collect()
    }

    /// Bootstrap every parameter of an estimator
    ///
    /// `estimate` maps a sample to its parameter values in the order of
    /// `names`, or `None` when the estimator fails on that sample. Failed
    /// resamples and resamples with non-finite values are skipped; an error
    /// is returned only when every resample fails.
    #[instrument(skip(self, data, names, original, estimate), fields(n = data.len(), n_resamples = self.n_resamples))]
    pub fn parameter_estimates<F>(
        &self,
        data: &[f64],
        names: &[&'static str],
        original: &[f64],
        estimate: F,
    ) -> Result<BootstrapResult>
    where
        F: Fn(&[f64]) -> Option<Vec<f64>> + Sync + Send,
    {
        if data.is_empty() {
            return Err(Error::empty_input("bootstrap"));
        }
        if names.len() != original.len() {
            return Err(Error::InvalidInput(format!(
                "{} parameter names for {} estimates",
                names.len(),
                original.len()
            )));
        }

        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        let k = original.len();
        let replicates: Vec<Option<Vec<f64>>> = self.strategy.execute_batch(self.n_resamples, |i| {
            let sample = Self::resample(data, seed, i);
            estimate(&sample).filter(|values| values.len() == k && values.iter().all(|v| v.is_finite()))
        });

        let successful: Vec<Vec<f64>> = replicates.into_iter().flatten().collect();
        let n_failed = self.n_resamples - successful.len();
        if successful.is_empty() {
            return Err(Error::Computation(format!(
                "All {} bootstrap resamples failed to produce estimates",
                self.n_resamples
            )));
        }
        if n_failed > 0 {
            warn!(n_failed, "some bootstrap resamples failed to produce estimates");
        }
        debug!(successful = successful.len(), "bootstrap resampling finished");

        let estimates = names
            .iter()
            .zip(original)
            .enumerate()
            .map(|(j, (&name, &value))| {
                let column: Vec<f64> = successful.iter().map(|values| values[j]).collect();
                BootstrapEstimate::from_replicates(name, value, &column, &self.method, self.confidence_level)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BootstrapResult {
            estimates,
            n_resamples: self.n_resamples,
            n_failed,
            seed,
        })
    }

    /// Bootstrap a single statistic of the sample
    pub fn statistic<F>(&self, data: &[f64], name: &'static str, statistic: F) -> Result<BootstrapEstimate>
    where
        F: Fn(&[f64]) -> f64 + Sync + Send,
    {
        let original = statistic(data);
        let mut result = self.parameter_estimates(data, &[name], &[original], |sample| {
            Some(vec![statistic(sample)])
        })?;
        result
            .estimates
            .pop()
            .ok_or_else(|| Error::Computation("bootstrap produced no estimate".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mean(sample: &[f64]) -> f64 {
        sample.iter().sum::<f64>() / sample.len() as f64
    }

    #[test]
    fn test_bootstrap_construction() {
        let bootstrap = Bootstrap::default()
            .with_resamples(1000)
            .with_confidence_level(0.9)
            .with_seed(42);

        assert_eq!(bootstrap.n_resamples(), 1000);
        assert_eq!(bootstrap.confidence_level(), ConfidenceLevel::NINETY);
        assert_eq!(Bootstrap::default().confidence_level(), ConfidenceLevel::NINETY_FIVE);
        assert_eq!(bootstrap.seed(), Some(42));
        assert_eq!(Bootstrap::default().n_resamples(), DEFAULT_RESAMPLES);
    }

    #[test]
    fn test_invalid_inputs() {
        let result = std::panic::catch_unwind(|| Bootstrap::default().with_confidence_level(1.5));
        assert!(result.is_err());

        let result = std::panic::catch_unwind(|| Bootstrap::default().with_resamples(0));
        assert!(result.is_err());

        let bootstrap = Bootstrap::default().with_seed(1);
        assert!(bootstrap.statistic(&[], "mean", mean).is_err());
        assert!(bootstrap
            .parameter_estimates(&[1.0], &["a", "b"], &[1.0], |_| None)
            .is_err());
    }

    #[test]
    fn test_resample_is_reproducible() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let a = Bootstrap::<PercentileBootstrap>::resample(&data, 7, 3);
        let b = Bootstrap::<PercentileBootstrap>::resample(&data, 7, 3);
        assert_eq!(a, b);
        assert_eq!(a.len(), data.len());
        assert!(a.iter().all(|x| data.contains(x)));
    }

    #[test]
    fn test_strategies_agree() {
        let data: Vec<f64> = (1..=30).map(f64::from).collect();
        let sequential = Bootstrap::default()
            .with_seed(9)
            .with_resamples(50)
            .with_strategy(ExecutionStrategy::Sequential)
            .statistic(&data, "mean", mean)
            .unwrap();
        let parallel = Bootstrap::default()
            .with_seed(9)
            .with_resamples(50)
            .with_strategy(ExecutionStrategy::Parallel)
            .statistic(&data, "mean", mean)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_constant_statistic_has_no_error() {
        let data = [1.0, 5.0, 9.0];
        let estimate = Bootstrap::default().with_seed(3).statistic(&data, "c", |_| 2.5).unwrap();
        assert_eq!(estimate.bias, 0.0);
        assert_eq!(estimate.variance, 0.0);
        assert_eq!(estimate.mse, 0.0);
        assert_eq!(estimate.interval.lower, 2.5);
        assert_eq!(estimate.interval.upper, 2.5);
    }

    #[test]
    fn test_mse_decomposition() {
        let data: Vec<f64> = (1..=20).map(|i| f64::from(i * i)).collect();
        let estimate = Bootstrap::default().with_seed(11).statistic(&data, "mean", mean).unwrap();
        assert_relative_eq!(estimate.mse, estimate.variance + estimate.bias.powi(2));
        assert!(estimate.interval.lower <= estimate.interval.upper);
    }

    #[test]
    fn test_failed_resamples_are_counted() {
        let data: Vec<f64> = (0..10).map(f64::from).collect();
        let result = Bootstrap::default()
            .with_seed(5)
            .with_resamples(100)
            .parameter_estimates(&data, &["max"], &[9.0], |sample| {
                let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (max == 9.0).then(|| vec![max])
            })
            .unwrap();
        assert!(result.n_failed > 0);
        assert_eq!(result.successful_resamples() + result.n_failed, 100);
        assert_eq!(result.get("max").unwrap().mean, 9.0);

        let all_failed = Bootstrap::default()
            .with_seed(5)
            .parameter_estimates(&data, &["x"], &[1.0], |_| None);
        assert!(all_failed.is_err());
    }
}
