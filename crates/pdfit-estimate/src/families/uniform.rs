//! Uniform and triangular end-point estimators

use super::{fit, range_end_points, require_count, require_not_all_equal, Estimate};
use pdfit_core::{Family, StatisticSummary};

/// End points padded by `range / (n - 1)` on each side
pub fn estimate_uniform(_data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    require_not_all_equal(stats)?;
    let (a, b) = range_end_points(stats);
    fit(Family::Uniform, &[a, b])
}

/// Padded end points plus the moment-matched mode `3 mean - a - b`
pub fn estimate_triangular(_data: &[f64], stats: &StatisticSummary) -> Estimate {
    require_count(stats, 2)?;
    require_not_all_equal(stats)?;
    let (a, b) = range_end_points(stats);
    let mode = (3.0 * stats.mean - a - b).clamp(a, b);
    fit(Family::Triangular, &[a, mode, b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_end_points() {
        let data = [2.0, 4.0, 6.0];
        let fit = estimate_uniform(&data, &StatisticSummary::of(&data)).unwrap();
        assert_relative_eq!(fit.parameters.get("min").unwrap(), 0.0);
        assert_relative_eq!(fit.parameters.get("max").unwrap(), 8.0);
    }

    #[test]
    fn test_triangular_mode_clamped() {
        let data = [0.0, 0.0, 0.0, 0.0, 10.0];
        let fit = estimate_triangular(&data, &StatisticSummary::of(&data)).unwrap();
        let (a, c, b) = (
            fit.parameters.get("min").unwrap(),
            fit.parameters.get("mode").unwrap(),
            fit.parameters.get("max").unwrap(),
        );
        assert_relative_eq!(a, -2.5);
        assert_relative_eq!(b, 12.5);
        // 3 * 2 - (-2.5) - 12.5 = -4 is clamped to a
        assert_relative_eq!(c, a);
    }

    #[test]
    fn test_all_equal() {
        let data = [1.0, 1.0, 1.0, 1.0];
        for estimator in [estimate_uniform, estimate_triangular] {
            let failure = estimator(&data, &StatisticSummary::of(&data)).unwrap_err();
            assert!(failure.to_string().contains("all equal"));
        }
    }
}
