//! Per-family estimators
//!
//! Every estimator is a pure function of the sample, its summary and the
//! configuration. Precondition helpers below return the failure that
//! describes the first violated requirement.

pub mod beta;
pub mod binomial;
pub mod exponential;
pub mod gamma;
pub mod logistic;
pub mod normal;
pub mod poisson;
pub mod uniform;
pub mod weibull;

use crate::types::{EstimationFailure, ParameterFit};
use pdfit_core::{Family, Parameters, StatisticSummary};

pub(crate) type Estimate = Result<ParameterFit, EstimationFailure>;

/// Tolerance for treating an observation as an integer
const INTEGER_TOLERANCE: f64 = 1e-9;

pub(crate) fn require_count(stats: &StatisticSummary, required: usize) -> Result<(), EstimationFailure> {
    if stats.count < required {
        Err(EstimationFailure::TooFewObservations { required })
    } else {
        Ok(())
    }
}

pub(crate) fn require_non_negative(family: Family, stats: &StatisticSummary) -> Result<(), EstimationFailure> {
    if stats.has_values_below(0.0) {
        Err(EstimationFailure::BelowLowerBound { family, bound: 0.0 })
    } else {
        Ok(())
    }
}

pub(crate) fn require_positive(family: Family, stats: &StatisticSummary) -> Result<(), EstimationFailure> {
    if stats.count > 0 && stats.min <= 0.0 {
        Err(EstimationFailure::NonPositiveValues { family })
    } else {
        Ok(())
    }
}

pub(crate) fn require_not_all_equal(stats: &StatisticSummary) -> Result<(), EstimationFailure> {
    if stats.all_equal() {
        Err(EstimationFailure::AllEqual)
    } else {
        Ok(())
    }
}

pub(crate) fn require_integers(family: Family, data: &[f64]) -> Result<(), EstimationFailure> {
    if data.iter().any(|x| (x - x.round()).abs() > INTEGER_TOLERANCE) {
        Err(EstimationFailure::NonIntegerValues { family })
    } else {
        Ok(())
    }
}

/// Sample variance, failing when it is not strictly positive
pub(crate) fn positive_variance(stats: &StatisticSummary) -> Result<f64, EstimationFailure> {
    match stats.variance {
        Some(v) if v > 0.0 => Ok(v),
        Some(v) => Err(EstimationFailure::NonPositiveVariance { variance: v }),
        None => Err(EstimationFailure::TooFewObservations { required: 2 }),
    }
}

/// Castillo–Hadi end points `[x_min - r/(n-1), x_max + r/(n-1)]`
pub(crate) fn range_end_points(stats: &StatisticSummary) -> (f64, f64) {
    let pad = stats.range() / (stats.count as f64 - 1.0);
    (stats.min - pad, stats.max + pad)
}

pub(crate) fn parameters(family: Family, values: &[f64]) -> Result<Parameters, EstimationFailure> {
    Parameters::for_family(family, values).map_err(|e| EstimationFailure::Numerical(e.to_string()))
}

pub(crate) fn fit(family: Family, values: &[f64]) -> Estimate {
    parameters(family, values).map(ParameterFit::new)
}
