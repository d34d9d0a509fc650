//! Logistic and Laplace location-scale estimators

use super::{fit, positive_variance, require_count, require_not_all_equal, Estimate};
use pdfit_core::{median_sorted, sorted, Family, StatisticSummary};
use std::f64::consts::PI;

/// Location from the mean, scale `s·√3/π` from the standard deviation
pub fn estimate_logistic(_data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    let variance = positive_variance(stats)?;
    fit(Family::Logistic, &[stats.mean, variance.sqrt() * 3f64.sqrt() / PI])
}

/// Location from the median, scale from the mean absolute deviation about it
pub fn estimate_laplace(data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    require_not_all_equal(stats)?;
    let median = median_sorted(&sorted(data));
    let scale = data.iter().map(|x| (x - median).abs()).sum::<f64>() / data.len() as f64;
    fit(Family::Laplace, &[median, scale])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_logistic() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let fit = estimate_logistic(&data, &StatisticSummary::of(&data)).unwrap();
        assert_relative_eq!(fit.parameters.get("location").unwrap(), 3.0);
        assert_relative_eq!(
            fit.parameters.get("scale").unwrap(),
            2.5f64.sqrt() * 3f64.sqrt() / PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_laplace() {
        let data = [1.0, 2.0, 3.0, 4.0, 10.0];
        let fit = estimate_laplace(&data, &StatisticSummary::of(&data)).unwrap();
        assert_relative_eq!(fit.parameters.get("location").unwrap(), 3.0);
        // |deviations| = 2, 1, 0, 1, 7
        assert_relative_eq!(fit.parameters.get("scale").unwrap(), 11.0 / 5.0);

        let equal = [1.0, 1.0, 1.0];
        assert!(estimate_laplace(&equal, &StatisticSummary::of(&equal)).is_err());
    }
}
