//! Interval constructions from a bootstrap distribution

use crate::types::{ConfidenceInterval, ConfidenceLevel};
use pdfit_core::{Error, Result};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, instrument};

/// How a confidence interval is built from bootstrap replicates
pub trait BootstrapMethod: Clone + Send + Sync {
    /// Interval for `original_estimate` given its bootstrap replicates
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: ConfidenceLevel,
    ) -> Result<ConfidenceInterval>;

    fn name(&self) -> &'static str;
}

fn sorted_estimates(bootstrap_estimates: &[f64]) -> Result<Vec<f64>> {
    if bootstrap_estimates.is_empty() {
        return Err(Error::InvalidInput("No bootstrap estimates".to_string()));
    }
    if bootstrap_estimates.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite("Bootstrap estimates"));
    }
    let mut sorted = bootstrap_estimates.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Order statistic at probability `p`, index `floor(p·len)` capped at the end
fn order_statistic(sorted: &[f64], p: f64) -> f64 {
    let idx = ((p * sorted.len() as f64) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Percentile bootstrap
///
/// Uses the empirical `alpha/2` and `1 - alpha/2` percentiles of the
/// bootstrap distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileBootstrap;

impl BootstrapMethod for PercentileBootstrap {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: ConfidenceLevel,
    ) -> Result<ConfidenceInterval> {
        let sorted = sorted_estimates(bootstrap_estimates)?;
        let tail = confidence_level.tail_probability();
        Ok(ConfidenceInterval::new(
            order_statistic(&sorted, tail),
            order_statistic(&sorted, 1.0 - tail),
            original_estimate,
            confidence_level.value(),
        ))
    }

    fn name(&self) -> &'static str {
        "Percentile Bootstrap"
    }
}

/// Bias-corrected percentile bootstrap
///
/// Shifts the percentiles by `z0 = Φ⁻¹(#{θ* < θ} / B)`. The acceleration is
/// taken as zero, so no jackknife pass is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiasCorrectedBootstrap;

impl BootstrapMethod for BiasCorrectedBootstrap {
    #[instrument(skip(self, bootstrap_estimates), fields(n_estimates = bootstrap_estimates.len()))]
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: ConfidenceLevel,
    ) -> Result<ConfidenceInterval> {
        let sorted = sorted_estimates(bootstrap_estimates)?;
        let standard = Normal::new(0.0, 1.0)?;

        let below = sorted.iter().filter(|&&x| x < original_estimate).count() as f64;
        let proportion = below / sorted.len() as f64;
        let z0 = if proportion <= 0.0 || proportion >= 1.0 {
            0.0
        } else {
            standard.inverse_cdf(proportion)
        };

        let tail = confidence_level.tail_probability();
        let lower_p = standard.cdf(2.0 * z0 + standard.inverse_cdf(tail));
        let upper_p = standard.cdf(2.0 * z0 + standard.inverse_cdf(1.0 - tail));
        debug!(z0, lower_p, upper_p, "bias corrected percentiles");

        Ok(ConfidenceInterval::new(
            order_statistic(&sorted, lower_p),
            order_statistic(&sorted, upper_p),
            original_estimate,
            confidence_level.value(),
        ))
    }

    fn name(&self) -> &'static str {
        "Bias Corrected Bootstrap"
    }
}
