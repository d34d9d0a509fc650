//! Exponential maximum likelihood

use super::{fit, require_count, require_non_negative, Estimate};
use crate::types::EstimationFailure;
use pdfit_core::{Family, StatisticSummary};

/// The MLE of the mean is the sample average
pub fn estimate(_data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 1)?;
    require_non_negative(Family::Exponential, stats)?;
    if stats.mean <= 0.0 {
        return Err(EstimationFailure::NonPositiveMean { mean: stats.mean });
    }
    fit(Family::Exponential, &[stats.mean])
}
