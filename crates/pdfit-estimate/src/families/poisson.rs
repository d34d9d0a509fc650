//! Poisson and negative binomial estimators

use super::{fit, require_count, require_integers, require_non_negative, Estimate};
use crate::types::EstimationFailure;
use pdfit_core::{Family, StatisticSummary};

/// The MLE of the Poisson mean is the sample average
pub fn estimate_poisson(data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 1)?;
    require_non_negative(Family::Poisson, stats)?;
    require_integers(Family::Poisson, data)?;
    if stats.mean <= 0.0 {
        return Err(EstimationFailure::NonPositiveMean { mean: stats.mean });
    }
    fit(Family::Poisson, &[stats.mean])
}

/// Method of moments: `p = mean / s²`, `r = mean² / (s² - mean)`
pub fn estimate_negative_binomial(data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    require_non_negative(Family::NegativeBinomial, stats)?;
    require_integers(Family::NegativeBinomial, data)?;
    let variance = stats.variance.unwrap_or(0.0);
    if variance <= stats.mean {
        return Err(EstimationFailure::VarianceNotAboveMean {
            mean: stats.mean,
            variance,
        });
    }
    if stats.mean <= 0.0 {
        return Err(EstimationFailure::NonPositiveMean { mean: stats.mean });
    }
    let p = stats.mean / variance;
    let r = stats.mean * stats.mean / (variance - stats.mean);
    fit(Family::NegativeBinomial, &[p, r])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_poisson() {
        let data = [0.0, 1.0, 2.0, 5.0];
        let fit = estimate_poisson(&data, &StatisticSummary::of(&data)).unwrap();
        assert_eq!(fit.parameters.get("mean"), Some(2.0));

        let zeros = [0.0, 0.0];
        assert!(estimate_poisson(&zeros, &StatisticSummary::of(&zeros)).is_err());

        let negative = [-1.0, 2.0, 3.0];
        let failure = estimate_poisson(&negative, &StatisticSummary::of(&negative)).unwrap_err();
        assert!(failure.to_string().contains("less than 0.0"));
    }

    #[test]
    fn test_negative_binomial() {
        let data = [0.0, 0.0, 1.0, 2.0, 7.0, 0.0, 3.0, 11.0];
        let stats = StatisticSummary::of(&data);
        let fit = estimate_negative_binomial(&data, &stats).unwrap();
        let p = fit.parameters.get("probability").unwrap();
        let r = fit.parameters.get("successes").unwrap();
        // moments are reproduced exactly
        assert_relative_eq!(r * (1.0 - p) / p, stats.mean, epsilon = 1e-10);
        assert_relative_eq!(r * (1.0 - p) / (p * p), stats.variance.unwrap(), epsilon = 1e-9);

        let under = [2.0, 3.0, 2.0, 3.0];
        let failure = estimate_negative_binomial(&under, &StatisticSummary::of(&under)).unwrap_err();
        assert!(matches!(failure, EstimationFailure::VarianceNotAboveMean { .. }));
    }
}
