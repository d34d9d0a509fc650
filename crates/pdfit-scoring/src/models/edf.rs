//! Statistics of the probability integral transform `u = F(x)`

use crate::candidate::Candidate;
use crate::traits::ScoringModel;
use crate::types::Metric;
use pdfit_core::{sorted, FittedDistribution};

/// Keeps `ln u` and `ln(1 - u)` finite
const TRANSFORM_EPSILON: f64 = 1e-12;

/// Sorted `F(x₍ᵢ₎)` clamped away from 0 and 1
pub fn probability_transform(data: &[f64], distribution: &FittedDistribution) -> Vec<f64> {
    sorted(data)
        .into_iter()
        .map(|x| distribution.cdf(x).clamp(TRANSFORM_EPSILON, 1.0 - TRANSFORM_EPSILON))
        .collect()
}

/// `A² = -n - (1/n) Σ (2i - 1) [ln uᵢ + ln(1 - u₍ₙ₊₁₋ᵢ₎)]`
pub(crate) fn anderson_darling(u: &[f64]) -> f64 {
    let n = u.len() as f64;
    let sum: f64 = u
        .iter()
        .zip(u.iter().rev())
        .enumerate()
        .map(|(i, (lo, hi))| (2.0 * i as f64 + 1.0) * (lo.ln() + (1.0 - hi).ln()))
        .sum();
    -n - sum / n
}

/// `W² = 1/(12n) + Σ (uᵢ - (2i - 1)/(2n))²`
pub(crate) fn cramer_von_mises(u: &[f64]) -> f64 {
    let n = u.len() as f64;
    let sum: f64 = u
        .iter()
        .enumerate()
        .map(|(i, ui)| (ui - (2.0 * i as f64 + 1.0) / (2.0 * n)).powi(2))
        .sum();
    1.0 / (12.0 * n) + sum
}

/// `U² = W² - n (ū - 1/2)²`
pub(crate) fn watson(u: &[f64]) -> f64 {
    let n = u.len() as f64;
    let mean = u.iter().sum::<f64>() / n;
    cramer_von_mises(u) - n * (mean - 0.5).powi(2)
}

/// `D = max_i max(i/n - uᵢ, uᵢ - (i - 1)/n)`
pub(crate) fn kolmogorov_smirnov(u: &[f64]) -> f64 {
    let n = u.len() as f64;
    u.iter()
        .enumerate()
        .map(|(i, ui)| {
            let i = i as f64;
            ((i + 1.0) / n - ui).max(ui - i / n)
        })
        .fold(0.0, f64::max)
}

fn transformed(data: &[f64], candidate: &Candidate) -> Option<Vec<f64>> {
    let u = probability_transform(data, candidate.distribution());
    (!u.is_empty() && u.iter().all(|x| x.is_finite())).then_some(u)
}

/// Anderson–Darling `A²`
#[derive(Debug, Clone, Copy, Default)]
pub struct AndersonDarlingModel;

impl ScoringModel for AndersonDarlingModel {
    fn metric(&self) -> Metric {
        Metric::AndersonDarling
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        transformed(data, candidate).map(|u| anderson_darling(&u))
    }
}

/// Cramér–von Mises `W²`
#[derive(Debug, Clone, Copy, Default)]
pub struct CramerVonMisesModel;

impl ScoringModel for CramerVonMisesModel {
    fn metric(&self) -> Metric {
        Metric::CramerVonMises
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        transformed(data, candidate).map(|u| cramer_von_mises(&u))
    }
}

/// Watson `U²`
#[derive(Debug, Clone, Copy, Default)]
pub struct WatsonModel;

impl ScoringModel for WatsonModel {
    fn metric(&self) -> Metric {
        Metric::Watson
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        transformed(data, candidate).map(|u| watson(&u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_statistics_by_hand() {
        let u = [0.25, 0.5, 0.75];
        // (2i-1)/(2n) = 1/6, 1/2, 5/6
        let w2 = 1.0 / 36.0 + (0.25f64 - 1.0 / 6.0).powi(2) + 0.0 + (0.75f64 - 5.0 / 6.0).powi(2);
        assert_relative_eq!(cramer_von_mises(&u), w2, epsilon = 1e-12);
        // symmetric around 1/2, so U² = W²
        assert_relative_eq!(watson(&u), w2, epsilon = 1e-12);

        let a2 = -3.0
            - ((0.25f64.ln() + 0.25f64.ln()) + 3.0 * (0.5f64.ln() + 0.5f64.ln()) + 5.0 * (0.75f64.ln() + 0.75f64.ln()))
                / 3.0;
        assert_relative_eq!(anderson_darling(&u), a2, epsilon = 1e-12);

        // largest gap is at u₁: 1/3 - 0.25 vs 0.25 - 0
        assert_relative_eq!(kolmogorov_smirnov(&u), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_watson_is_location_invariant() {
        let u = [0.1, 0.2, 0.3, 0.4];
        let shifted: Vec<f64> = u.iter().map(|x| x + 0.3).collect();
        assert_relative_eq!(watson(&u), watson(&shifted), epsilon = 1e-12);
        assert!(cramer_von_mises(&u) > cramer_von_mises(&shifted));
    }
}
