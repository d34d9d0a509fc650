//! Binomial estimators

use super::{fit, require_count, require_integers, require_non_negative, Estimate};
use crate::types::EstimationFailure;
use pdfit_core::{Family, StatisticSummary};

fn check_counts(data: &[f64], stats: &StatisticSummary) -> Result<(), EstimationFailure> {
    require_count(stats, 2)?;
    require_non_negative(Family::Binomial, stats)?;
    require_integers(Family::Binomial, data)
}

/// Method of moments: `p = 1 - s²/mean`, `n = mean / p`
///
/// `n` is rounded and raised to the sample maximum when needed, in which
/// case `p` is recomputed as `mean / n` so the mean is still matched.
pub fn estimate_moments(data: &[f64], stats: &StatisticSummary) -> Estimate {
    check_counts(data, stats)?;
    let variance = stats.variance.unwrap_or(0.0);
    if stats.mean <= variance {
        return Err(EstimationFailure::MeanNotAboveVariance {
            mean: stats.mean,
            variance,
        });
    }
    let p = 1.0 - variance / stats.mean;
    let trials = (stats.mean / p).round().max(1.0);
    if trials < stats.max {
        return fit(Family::Binomial, &[stats.mean / stats.max, stats.max]);
    }
    fit(Family::Binomial, &[p, trials])
}

/// Trials from the padded sample maximum, `p = mean / n`
pub fn estimate_max_based(data: &[f64], stats: &StatisticSummary) -> Estimate {
    check_counts(data, stats)?;
    if stats.max <= 0.0 {
        return Err(EstimationFailure::ZeroMaximum);
    }
    let pad = stats.range() / (stats.count as f64 - 1.0);
    let trials = (stats.max + pad).round().max(stats.max);
    fit(Family::Binomial, &[stats.mean / trials, trials])
}
