//! Comparisons between a histogram and a candidate model

use crate::traits::ProbabilityModel;
use crate::types::Histogram;

/// Observed-versus-expected statistics over the bins of a histogram
///
/// The underflow and overflow cells from [`Histogram::tail_cells`] take part
/// in every statistic, so observations outside the break points count
/// against the model exactly like observations in a badly fitted bin.
pub trait HistogramOps {
    /// Pearson statistic `Σ (observed − expected)² / expected`
    ///
    /// Infinite when a cell holding observations has zero expected count.
    fn chi_squared_statistic<M: ProbabilityModel + ?Sized>(&self, model: &M) -> f64;

    /// Sum of squared differences between bin fractions and bin probabilities
    fn sum_squared_error<M: ProbabilityModel + ?Sized>(&self, model: &M) -> f64;

    /// Indices of bins whose expected count does not exceed `min_expected`
    fn sparse_bins<M: ProbabilityModel + ?Sized>(&self, model: &M, min_expected: f64) -> Vec<usize>;

    /// Largest absolute difference between the empirical and model CDF at
    /// the bin edges
    fn max_cdf_gap<M: ProbabilityModel + ?Sized>(&self, model: &M) -> f64;
}

impl HistogramOps for Histogram {
    fn chi_squared_statistic<M: ProbabilityModel + ?Sized>(&self, model: &M) -> f64 {
        let n = self.total_count() as f64;
        let tails = self.tail_cells(model).map(|(observed, p)| (observed, p * n));
        self.bin_counts()
            .into_iter()
            .zip(self.expected_counts(model))
            .chain(tails)
            .map(|(observed, expected)| {
                let observed = observed as f64;
                if expected > 0.0 {
                    (observed - expected).powi(2) / expected
                } else if observed > 0.0 {
                    f64::INFINITY
                } else {
                    0.0
                }
            })
            .sum()
    }

    fn sum_squared_error<M: ProbabilityModel + ?Sized>(&self, model: &M) -> f64 {
        let n = self.total_count() as f64;
        let tails = self
            .tail_cells(model)
            .map(|(observed, p)| (if n > 0.0 { observed as f64 / n } else { 0.0 }, p));
        self.bin_fractions()
            .into_iter()
            .zip(self.bin_probabilities(model))
            .chain(tails)
            .map(|(f, p)| (f - p).powi(2))
            .sum()
    }

    fn sparse_bins<M: ProbabilityModel + ?Sized>(&self, model: &M, min_expected: f64) -> Vec<usize> {
        self.expected_counts(model)
            .into_iter()
            .enumerate()
            .filter(|(_, e)| *e <= min_expected)
            .map(|(i, _)| i)
            .collect()
    }

    fn max_cdf_gap<M: ProbabilityModel + ?Sized>(&self, model: &M) -> f64 {
        let n = self.total_count() as f64;
        let [(underflow, below), _] = self.tail_cells(model);
        let underflow = if n > 0.0 { underflow as f64 / n } else { 0.0 };
        let empirical = cumulative(&[vec![underflow], self.bin_fractions()].concat());
        let theoretical = cumulative(&[vec![below], self.bin_probabilities(model)].concat());
        empirical
            .iter()
            .zip(theoretical.iter())
            .map(|(e, t)| (e - t).abs())
            .fold(0.0, f64::max)
    }
}

fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::BreakPointBuilder;
    use crate::traits::HistogramBuilder;
    use approx::assert_relative_eq;
    use pdfit_core::{Family, FittedDistribution, Parameters};

    fn uniform01() -> FittedDistribution {
        let params = Parameters::for_family(Family::Uniform, &[0.0, 1.0]).unwrap();
        FittedDistribution::from_parameters(Family::Uniform, &params, 0.0).unwrap()
    }

    #[test]
    fn test_perfect_fit() {
        let model = uniform01();
        let hist = BreakPointBuilder::new(&[0.0, 0.25, 0.5, 0.75, 1.0])
            .unwrap()
            .build(&[0.1, 0.3, 0.6, 0.9])
            .unwrap();
        assert_relative_eq!(hist.chi_squared_statistic(&model), 0.0);
        assert_relative_eq!(hist.sum_squared_error(&model), 0.0);
        assert_relative_eq!(hist.max_cdf_gap(&model), 0.0, epsilon = 1e-12);
        assert_eq!(hist.sparse_bins(&model, 5.0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_chi_squared_by_hand() {
        let model = uniform01();
        let hist = BreakPointBuilder::new(&[0.0, 0.5, 1.0])
            .unwrap()
            .build(&[0.1, 0.2, 0.3, 0.9])
            .unwrap();
        // expected 2 and 2, observed 3 and 1
        assert_relative_eq!(hist.chi_squared_statistic(&model), 1.0);
        assert_relative_eq!(hist.sum_squared_error(&model), 2.0 * 0.25 * 0.25);
    }

    #[test]
    fn test_out_of_range_observations_count() {
        let model = uniform01();
        let hist = BreakPointBuilder::new(&[0.25, 0.5, 0.75])
            .unwrap()
            .build(&[0.1, 0.2, 0.3, 0.6])
            .unwrap();
        assert_eq!(hist.underflow(), 2);
        assert_eq!(hist.tail_cells(&model), [(2, 0.25), (0, 0.25)]);
        // cells: underflow 2, bins 1 and 1, overflow 0; one expected in each
        assert_relative_eq!(hist.chi_squared_statistic(&model), 2.0);
        assert_relative_eq!(hist.sum_squared_error(&model), 2.0 * 0.25 * 0.25);
        assert_relative_eq!(hist.max_cdf_gap(&model), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_expected_bin_is_infinite() {
        let model = uniform01();
        let hist = BreakPointBuilder::new(&[0.0, 1.0, 2.0])
            .unwrap()
            .build(&[0.5, 1.5])
            .unwrap();
        assert!(hist.chi_squared_statistic(&model).is_infinite());
    }
}
