//! Information criteria

use crate::candidate::Candidate;
use crate::traits::ScoringModel;
use crate::types::Metric;

fn log_likelihood(data: &[f64], candidate: &Candidate) -> Option<f64> {
    let ll = candidate.distribution().sum_log_likelihood(data);
    ll.is_finite().then_some(ll)
}

/// Akaike information criterion, `2k - 2 ln L`
#[derive(Debug, Clone, Copy, Default)]
pub struct AicModel;

impl ScoringModel for AicModel {
    fn metric(&self) -> Metric {
        Metric::Aic
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        let k = candidate.parameter_count() as f64;
        log_likelihood(data, candidate).map(|ll| 2.0 * k - 2.0 * ll)
    }
}

/// Bayesian information criterion, `k ln n - 2 ln L`
#[derive(Debug, Clone, Copy, Default)]
pub struct BicModel;

impl ScoringModel for BicModel {
    fn metric(&self) -> Metric {
        Metric::Bic
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        let k = candidate.parameter_count() as f64;
        let n = data.len() as f64;
        log_likelihood(data, candidate).map(|ll| k * n.ln() - 2.0 * ll)
    }
}
