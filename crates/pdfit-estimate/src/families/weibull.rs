//! Weibull estimators
//!
//! Two estimators are provided:
//!
//! - maximum likelihood: Law's closed-form seed, a few Newton steps on the
//!   profile score equation and a final bisection
//! - percentile matching: closed-form shapes from pairs of symmetric
//!   empirical percentiles, averaged and bias corrected with a grouped
//!   (delete-d) jackknife
//!
//! Both use the scale-given-shape MLE `scale = (mean xᵃ)^(1/a)`.

use super::{parameters, require_count, require_not_all_equal, require_positive, Estimate};
use crate::config::EstimatorConfig;
use crate::types::{EstimationFailure, ParameterFit};
use pdfit_core::{find_interval, has_root, quantile_sorted, sorted, BisectionRootFinder, Family, Interval, StatisticSummary};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Minimum sample size of the percentile estimator is one more than this
pub const PERCENTILE_MIN_SAMPLE: usize = 10;

/// Number of interleaved groups deleted in turn by the jackknife
const JACKKNIFE_GROUPS: usize = 5;

/// Smallest group for which the jackknife correction is attempted
const JACKKNIFE_MIN_GROUP_SIZE: usize = 3;

/// Power sums over data rescaled by its maximum
///
/// Returns `(Σw, Σw ln x, Σw (ln x)²)` with `w = (x / max)^a`. Ratios of
/// these equal the ratios of the unscaled sums but cannot overflow.
fn power_sums(data: &[f64], max: f64, a: f64) -> (f64, f64, f64) {
    data.iter().fold((0.0, 0.0, 0.0), |(b, c, h), &x| {
        let w = (x / max).powf(a);
        let l = x.ln();
        (b + w, c + w * l, h + w * l * l)
    })
}

/// Scale maximising the likelihood for a given shape
pub fn scale_given_shape(data: &[f64], max: f64, shape: f64) -> f64 {
    let (b, _, _) = power_sums(data, max, shape);
    max * (b / data.len() as f64).powf(1.0 / shape)
}

/// Law (2007) initial shape estimate
fn initial_shape(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let (sum, sum_sq) = data.iter().fold((0.0, 0.0), |(s, q), &x| {
        let l = x.ln();
        (s + l, q + l * l)
    });
    let inner = (6.0 / (PI * PI)) * (sum_sq - sum * sum / n) / (n - 1.0);
    inner.powf(-0.5)
}

fn weibull_fit(data: &[f64], max: f64, shape: f64) -> Result<ParameterFit, EstimationFailure> {
    let scale = scale_given_shape(data, max, shape);
    if !(shape > 0.0 && scale.is_finite() && scale > 0.0) {
        return Err(EstimationFailure::Numerical(format!(
            "invalid Weibull parameters shape={shape}, scale={scale}"
        )));
    }
    Ok(ParameterFit::new(parameters(Family::Weibull, &[shape, scale])?))
}

/// Maximum likelihood estimate
///
/// A search that fails to converge is reported as
/// [`EstimationFailure::NotConverged`] carrying the best parameters found.
pub fn estimate_mle(data: &[f64], stats: &StatisticSummary, config: &EstimatorConfig) -> Estimate {
    require_count(stats, 2)?;
    require_positive(Family::Weibull, stats)?;
    require_not_all_equal(stats)?;

    let n = data.len() as f64;
    let max = stats.max;
    let mean_log = data.iter().map(|x| x.ln()).sum::<f64>() / n;
    let score = |a: f64| {
        let (b, c, _) = power_sums(data, max, a);
        c / b - 1.0 / a - mean_log
    };

    let mut shape = initial_shape(data);
    debug!(shape, "weibull initial shape");
    for step in 0..config.newton_steps {
        let (b, c, h) = power_sums(data, max, shape);
        let ratio = c / b;
        let numerator = mean_log + 1.0 / shape - ratio;
        let denominator = 1.0 / (shape * shape) + h / b - ratio * ratio;
        let next = shape + numerator / denominator;
        if !next.is_finite() || next <= 0.0 {
            shape = newton_fallback(data, stats, config, shape);
            debug!(step, shape, "newton left the domain");
            break;
        }
        let delta = (next - shape).abs();
        shape = next;
        if delta < config.root_finder.desired_precision {
            break;
        }
    }

    let start = Interval::centered(shape, config.bisection_width / 2.0).floor_lower(config.zero_tolerance);
    let bracket = if has_root(score, start) {
        Some(start)
    } else {
        find_interval(score, start, Some(config.zero_tolerance), &config.root_finder)
    };

    let not_converged = |shape: f64, reason: &str| -> Estimate {
        warn!(shape, reason, "weibull MLE did not converge");
        let best = weibull_fit(data, max, shape)?;
        Err(EstimationFailure::NotConverged {
            parameters: best.parameters,
            reason: reason.to_string(),
        })
    };

    let Some(bracket) = bracket else {
        return not_converged(shape, "no sign change around the Newton estimate");
    };
    match BisectionRootFinder::new(config.root_finder).solve(score, bracket) {
        Ok(root) if root.converged => weibull_fit(data, max, root.root),
        Ok(root) => not_converged(root.root, "bisection did not reach the desired precision"),
        Err(_) => not_converged(shape, "bracket did not contain a root"),
    }
}

/// Replacement seed when Newton produces an unusable shape: the average
/// of the Law seed and the percentile estimate when one is available
fn newton_fallback(data: &[f64], stats: &StatisticSummary, config: &EstimatorConfig, last: f64) -> f64 {
    let seed = if last.is_finite() && last > 0.0 { last } else { initial_shape(data) };
    match percentile_shape(data, stats, config) {
        Ok(p) => 0.5 * (seed + p),
        Err(_) => seed,
    }
}

/// Average of the pairwise percentile shapes over sorted data
fn pairwise_shape(sorted: &[f64], percentiles: &[f64]) -> Option<f64> {
    let shapes: Vec<f64> = percentiles
        .iter()
        .filter_map(|&p| {
            let lower = quantile_sorted(sorted, p);
            let upper = quantile_sorted(sorted, 1.0 - p);
            let shape = ((-p.ln()).ln() - (-(1.0 - p).ln()).ln()) / (upper.ln() - lower.ln());
            (shape.is_finite() && shape > 0.0).then_some(shape)
        })
        .collect();
    (!shapes.is_empty()).then(|| shapes.iter().sum::<f64>() / shapes.len() as f64)
}

/// Leave-one-group-out shapes for the grouped jackknife
///
/// Group `j` holds every `JACKKNIFE_GROUPS`-th order statistic starting at
/// `j`, so each reduced sample still spans the whole range of the data.
fn group_shapes(sorted: &[f64], percentiles: &[f64]) -> Vec<f64> {
    let mut reduced = Vec::with_capacity(sorted.len());
    (0..JACKKNIFE_GROUPS)
        .filter_map(|group| {
            reduced.clear();
            reduced.extend(
                sorted
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| i % JACKKNIFE_GROUPS != group)
                    .map(|(_, &x)| x),
            );
            pairwise_shape(&reduced, percentiles)
        })
        .collect()
}

/// Grouped jackknife correction of `full`
///
/// The corrected shape is kept only when it stays within the spread of the
/// leave-one-group-out shapes; otherwise `full` is returned unchanged.
fn jackknife_shape(sorted: &[f64], percentiles: &[f64], full: f64) -> f64 {
    if sorted.len() < JACKKNIFE_GROUPS * JACKKNIFE_MIN_GROUP_SIZE {
        return full;
    }
    let partials = group_shapes(sorted, percentiles);
    if partials.len() < 2 {
        return full;
    }
    let g = partials.len() as f64;
    let mean = partials.iter().sum::<f64>() / g;
    let (lo, hi) = partials
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    let corrected = g * full - (g - 1.0) * mean;
    let stable = corrected.is_finite() && corrected > 0.0 && (corrected - full).abs() <= hi - lo;
    debug!(full, corrected, spread = hi - lo, stable, "weibull percentile jackknife");
    if stable {
        corrected
    } else {
        full
    }
}

fn percentile_shape(data: &[f64], stats: &StatisticSummary, config: &EstimatorConfig) -> Result<f64, EstimationFailure> {
    require_count(stats, PERCENTILE_MIN_SAMPLE + 1)?;
    require_positive(Family::Weibull, stats)?;
    require_not_all_equal(stats)?;

    let sorted = sorted(data);
    let percentiles = config.percentiles_for(sorted.len());
    let full = pairwise_shape(&sorted, percentiles)
        .ok_or_else(|| EstimationFailure::Numerical("percentile pairs were tied".to_string()))?;
    Ok(jackknife_shape(&sorted, percentiles, full))
}

/// Percentile matching with jackknife bias correction
pub fn estimate_percentile(data: &[f64], stats: &StatisticSummary, config: &EstimatorConfig) -> Estimate {
    let shape = percentile_shape(data, stats, config)?;
    weibull_fit(data, stats.max, shape)
}
