//! Beta and generalized beta method of moments

use super::{fit, positive_variance, range_end_points, require_count, require_not_all_equal, Estimate};
use crate::types::EstimationFailure;
use pdfit_core::{Family, StatisticSummary};

/// Moment-matched shapes for a mean and variance on `[0, 1]`
fn moment_shapes(mean: f64, variance: f64) -> Result<(f64, f64), EstimationFailure> {
    let common = mean * (1.0 - mean) / variance - 1.0;
    let alpha = mean * common;
    let beta = (1.0 - mean) * common;
    if alpha > 0.0 && beta > 0.0 {
        Ok((alpha, beta))
    } else {
        Err(EstimationFailure::NonPositiveShape { alpha, beta })
    }
}

/// Beta on `[0, 1]`
pub fn estimate_beta(_data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    if stats.min < 0.0 || stats.max > 1.0 {
        return Err(EstimationFailure::OutOfRange {
            family: Family::Beta,
            lower: 0.0,
            upper: 1.0,
        });
    }
    let variance = positive_variance(stats)?;
    let (alpha, beta) = moment_shapes(stats.mean, variance)?;
    fit(Family::Beta, &[alpha, beta])
}

/// Beta on an estimated support `[min, max]`
///
/// The support uses the same padded end points as the uniform estimator;
/// shapes are then moment matched on the data rescaled to `[0, 1]`.
pub fn estimate_generalized(_data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    require_not_all_equal(stats)?;
    let (min, max) = range_end_points(stats);
    let width = max - min;
    let variance = positive_variance(stats)?;
    let (alpha, beta) = moment_shapes((stats.mean - min) / width, variance / (width * width))?;
    fit(Family::GeneralizedBeta, &[alpha, beta, min, max])
}
