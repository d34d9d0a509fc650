//! Probability-plot and quantile-plot discrepancies

use crate::candidate::Candidate;
use crate::traits::ScoringModel;
use crate::types::Metric;
use pdfit_core::sorted;

/// Plotting positions `(i - 0.5) / n`
pub fn plotting_positions(n: usize) -> impl Iterator<Item = f64> {
    let nf = n as f64;
    (1..=n).map(move |i| (i as f64 - 0.5) / nf)
}

/// `Σ (x₍ᵢ₎ - F⁻¹(pᵢ))²`
fn qq_sse(data: &[f64], candidate: &Candidate) -> f64 {
    let distribution = candidate.distribution();
    sorted(data)
        .iter()
        .zip(plotting_positions(data.len()))
        .map(|(x, p)| (x - distribution.inv_cdf(p)).powi(2))
        .sum()
}

/// `Σ (F(x₍ᵢ₎) - pᵢ)²`
#[derive(Debug, Clone, Copy, Default)]
pub struct PpSseModel;

impl ScoringModel for PpSseModel {
    fn metric(&self) -> Metric {
        Metric::PpSse
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        let distribution = candidate.distribution();
        let sse = sorted(data)
            .iter()
            .zip(plotting_positions(data.len()))
            .map(|(x, p)| (distribution.cdf(*x) - p).powi(2))
            .sum();
        Some(sse)
    }
}

/// Squared distance between order statistics and model quantiles
#[derive(Debug, Clone, Copy, Default)]
pub struct QqSseModel;

impl ScoringModel for QqSseModel {
    fn metric(&self) -> Metric {
        Metric::QqSse
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        Some(qq_sse(data, candidate))
    }
}

/// Mallows L2 distance, `√(QQ-SSE / n)`
#[derive(Debug, Clone, Copy, Default)]
pub struct MallowsL2Model;

impl ScoringModel for MallowsL2Model {
    fn metric(&self) -> Metric {
        Metric::MallowsL2
    }

    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64> {
        Some((qq_sse(data, candidate) / data.len() as f64).sqrt())
    }
}
