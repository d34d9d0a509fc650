//! Location shift for families supported on `[0, ∞)`
//!
//! Uses the Law & Kelton estimator built from the minimum, the maximum and
//! the smallest observation above the minimum:
//!
//! ```text
//! shift = (x_min * x_max - x_k^2) / (x_min + x_max - 2 x_k)
//! ```
//!
//! The estimate is a best-effort heuristic. Whenever its preconditions fail,
//! or the estimate is not a usable left shift, it is zero.

use crate::config::DEFAULT_ZERO_TOLERANCE;
use crate::types::ShiftedData;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct ShiftEstimator {
    zero_tolerance: f64,
}

impl Default for ShiftEstimator {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
        }
    }
}

impl ShiftEstimator {
    pub fn new(zero_tolerance: f64) -> Self {
        assert!(zero_tolerance >= 0.0, "Zero tolerance must be non-negative");
        Self { zero_tolerance }
    }

    pub fn zero_tolerance(&self) -> f64 {
        self.zero_tolerance
    }

    /// Estimated shift, or zero when the data does not support one
    ///
    /// Requires at least three finite, non-negative observations that are
    /// not all equal. Estimates below the zero tolerance, negative
    /// estimates and estimates at or above the minimum are reported as zero.
    pub fn estimate(&self, data: &[f64]) -> f64 {
        if data.len() < 3 || data.iter().any(|x| !x.is_finite() || *x < 0.0) {
            return 0.0;
        }
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return 0.0;
        }
        let second = data
            .iter()
            .copied()
            .filter(|&x| x > min)
            .fold(f64::INFINITY, f64::min);

        let denominator = min + max - 2.0 * second;
        if denominator == 0.0 {
            return 0.0;
        }
        let shift = (min * max - second * second) / denominator;
        debug!(shift, min, second, max, "raw shift estimate");

        if !shift.is_finite() || shift.abs() < self.zero_tolerance || shift < 0.0 || shift >= min {
            0.0
        } else {
            shift
        }
    }

    /// Shift the data when a non-zero shift is estimated
    pub fn apply(&self, data: &[f64]) -> Option<ShiftedData> {
        let shift = self.estimate(data);
        (shift > 0.0).then(|| ShiftedData::new(shift, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shift_by_hand() {
        // min 10, second 11, max 30: (300 - 121) / (40 - 22) = 179 / 18
        let data = [12.0, 10.0, 30.0, 11.0, 15.0];
        assert_relative_eq!(ShiftEstimator::default().estimate(&data), 179.0 / 18.0);
    }

    #[test]
    fn test_shift_preconditions() {
        let est = ShiftEstimator::default();
        assert_eq!(est.estimate(&[1.0, 2.0]), 0.0);
        assert_eq!(est.estimate(&[-1.0, 2.0, 3.0]), 0.0);
        assert_eq!(est.estimate(&[4.0, 4.0, 4.0]), 0.0);
        // zero denominator: min + max == 2 * second
        assert_eq!(est.estimate(&[1.0, 2.0, 3.0]), 0.0);
        assert!(est.apply(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_zero_minimum_is_not_shifted() {
        let est = ShiftEstimator::default();
        assert_eq!(est.estimate(&[0.0, 0.5, 0.7, 3.0, 9.0]), 0.0);
        assert_eq!(est.estimate(&[0.0, 5.0, 6.0, 7.0]), 0.0);
    }

    #[test]
    fn test_shift_applied_once() {
        let est = ShiftEstimator::default();
        let data = [12.0, 10.0, 30.0, 11.0, 15.0];
        let shifted = est.apply(&data).unwrap();
        assert_relative_eq!(shifted.data[1], 10.0 - shifted.shift);
        assert_eq!(est.estimate(&shifted.data), 0.0);
    }
}
