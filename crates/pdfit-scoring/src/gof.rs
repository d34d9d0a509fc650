//! Goodness-of-fit tests with p-values
//!
//! The scoring models rank candidates by raw statistics; these tests turn
//! the same statistics into p-values for reporting. The p-values ignore
//! that the parameters were estimated from the sample, so they are
//! conservative.

use crate::asymptotic::{
    anderson_darling_cdf, cramer_von_mises_cdf, kolmogorov_smirnov_p_value, watson_cdf,
};
use crate::candidate::Candidate;
use crate::models::{
    edf::{anderson_darling, cramer_von_mises, kolmogorov_smirnov, watson},
    fitted_histogram, probability_transform, ChiSquaredModel,
};
use pdfit_histogram::{HistogramConfig, HistogramOps};
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GofTest {
    ChiSquared,
    AndersonDarling,
    CramerVonMises,
    Watson,
    KolmogorovSmirnov,
}

impl GofTest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChiSquared => "Chi-Squared",
            Self::AndersonDarling => "Anderson-Darling",
            Self::CramerVonMises => "Cramer-von Mises",
            Self::Watson => "Watson",
            Self::KolmogorovSmirnov => "Kolmogorov-Smirnov",
        }
    }
}

/// Outcome of one goodness-of-fit test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodnessOfFit {
    pub test: GofTest,
    pub statistic: f64,
    pub p_value: f64,
    /// Only for the chi-squared test
    pub degrees_of_freedom: Option<usize>,
}

impl GoodnessOfFit {
    fn new(test: GofTest, statistic: f64, cdf: f64) -> Option<Self> {
        let p_value = (1.0 - cdf).clamp(0.0, 1.0);
        (statistic.is_finite() && p_value.is_finite()).then_some(Self {
            test,
            statistic,
            p_value,
            degrees_of_freedom: None,
        })
    }

    /// True when the fit is rejected at significance level `alpha`
    pub fn rejects(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

impl fmt::Display for GoodnessOfFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: statistic={:.6}, p={:.4}", self.test.name(), self.statistic, self.p_value)?;
        if let Some(dof) = self.degrees_of_freedom {
            write!(f, ", dof={dof}")?;
        }
        Ok(())
    }
}

/// Pearson chi-squared test on the equal-probability histogram
pub fn chi_squared_test(data: &[f64], candidate: &Candidate, config: &HistogramConfig) -> Option<GoodnessOfFit> {
    let histogram = fitted_histogram(data, candidate, config)?;
    let dof = ChiSquaredModel::degrees_of_freedom(histogram.len(), candidate.parameter_count())?;
    let statistic = histogram.chi_squared_statistic(candidate.distribution());
    let reference = ChiSquared::new(dof as f64).ok()?;
    let mut result = GoodnessOfFit::new(GofTest::ChiSquared, statistic, reference.cdf(statistic))?;
    result.degrees_of_freedom = Some(dof);
    Some(result)
}

/// The four EDF tests, in the order AD, CvM, Watson, KS
pub fn edf_tests(data: &[f64], candidate: &Candidate) -> Vec<GoodnessOfFit> {
    let u = probability_transform(data, candidate.distribution());
    if u.is_empty() || u.iter().any(|x| !x.is_finite()) {
        return Vec::new();
    }
    let n = u.len();
    let a2 = anderson_darling(&u);
    let w2 = cramer_von_mises(&u);
    let u2 = watson(&u);
    let d = kolmogorov_smirnov(&u);
    [
        GoodnessOfFit::new(GofTest::AndersonDarling, a2, anderson_darling_cdf(n, a2)),
        GoodnessOfFit::new(GofTest::CramerVonMises, w2, cramer_von_mises_cdf(n, w2)),
        GoodnessOfFit::new(GofTest::Watson, u2, watson_cdf(n, u2)),
        GoodnessOfFit::new(GofTest::KolmogorovSmirnov, d, 1.0 - kolmogorov_smirnov_p_value(n, d)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Every test that can be computed for `candidate`
pub fn goodness_of_fit(data: &[f64], candidate: &Candidate, config: &HistogramConfig) -> Vec<GoodnessOfFit> {
    chi_squared_test(data, candidate, config)
        .into_iter()
        .chain(edf_tests(data, candidate))
        .collect()
}
