//! Gamma method of moments and maximum likelihood
//!
//! The MLE solves the profile score equation for the shape `α`,
//!
//! ```text
//! ln(mean / α) + ψ(α) - mean(ln x) = 0
//! ```
//!
//! by bisection over a bracket grown from the moment estimate. When no root
//! can be bracketed or the search runs out of budget the moment estimate is
//! returned instead, with a note saying so.

use super::{fit, positive_variance, require_count, require_non_negative, Estimate};
use crate::config::EstimatorConfig;
use crate::types::{EstimationFailure, ParameterFit};
use pdfit_core::{find_interval, has_root, BisectionRootFinder, Family, Interval, StatisticSummary};
use statrs::function::gamma::digamma;
use tracing::{debug, warn};

fn moment_shape_scale(stats: &StatisticSummary) -> Result<(f64, f64), EstimationFailure> {
    require_count(stats, 2)?;
    require_non_negative(Family::Gamma, stats)?;
    if stats.mean <= 0.0 {
        return Err(EstimationFailure::NonPositiveMean { mean: stats.mean });
    }
    let variance = positive_variance(stats)?;
    Ok((stats.mean * stats.mean / variance, variance / stats.mean))
}

/// `shape = mean² / variance`, `scale = variance / mean`
pub fn estimate_moments(_data: &[f64], stats: &StatisticSummary) -> Estimate {
    let (shape, scale) = moment_shape_scale(stats)?;
    fit(Family::Gamma, &[shape, scale])
}

/// Maximum likelihood with a moment-estimate fallback
pub fn estimate_mle(data: &[f64], stats: &StatisticSummary, config: &EstimatorConfig) -> Estimate {
    let (mom_shape, mom_scale) = moment_shape_scale(stats)?;
    let fallback = |reason: &str| -> Estimate {
        warn!(reason, "gamma MLE falling back to method of moments");
        Ok(fit(Family::Gamma, &[mom_shape, mom_scale])?
            .with_note(format!("Gamma MLE {reason}; using the method of moments estimate")))
    };

    if stats.min <= 0.0 {
        return fallback("needs strictly positive data");
    }

    let n = stats.count as f64;
    let mean = stats.mean;
    let mean_log = data.iter().map(|x| x.ln()).sum::<f64>() / n;
    let score = |alpha: f64| (mean / alpha).ln() + digamma(alpha) - mean_log;

    let half_width = config.gamma_interval_factor * (2.0 * mom_shape * (mom_shape + 1.0) / n).sqrt();
    let start = Interval::centered(mom_shape, half_width).floor_lower(config.zero_tolerance);
    debug!(mom_shape, lower = start.lower, upper = start.upper, "gamma MLE search interval");

    let bracket = if has_root(score, start) {
        Some(start)
    } else {
        find_interval(score, start, Some(config.zero_tolerance), &config.root_finder)
    };
    let Some(bracket) = bracket else {
        return fallback("could not bracket the shape");
    };

    match BisectionRootFinder::new(config.root_finder).solve(score, bracket) {
        Ok(root) if root.converged && root.root > 0.0 => {
            debug!(shape = root.root, iterations = root.iterations, "gamma MLE converged");
            fit(Family::Gamma, &[root.root, mean / root.root])
        }
        Ok(_) => fallback("did not converge"),
        Err(_) => fallback("lost its bracket"),
    }
}

/// Note attached to fits that fell back to moments
pub fn is_fallback(fit: &ParameterFit) -> bool {
    fit.note.as_deref().is_some_and(|n| n.contains("method of moments"))
}
