//! The built-in estimators and the family → estimator registry

use crate::config::EstimatorConfig;
use crate::families::{beta, binomial, exponential, gamma, logistic, normal, poisson, uniform, weibull};
use crate::traits::ParameterEstimator;
use crate::types::{EstimationFailure, ParameterFit};
use pdfit_core::{Family, StatisticSummary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Every estimator shipped with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Estimator {
    Exponential,
    Normal,
    Lognormal,
    GammaMoments,
    GammaMle,
    WeibullMle,
    WeibullPercentile,
    Beta,
    GeneralizedBeta,
    BinomialMoments,
    BinomialMax,
    NegativeBinomial,
    Poisson,
    Uniform,
    Triangular,
    Logistic,
    Laplace,
}

impl Estimator {
    pub const ALL: [Estimator; 17] = [
        Self::Exponential,
        Self::Normal,
        Self::Lognormal,
        Self::GammaMoments,
        Self::GammaMle,
        Self::WeibullMle,
        Self::WeibullPercentile,
        Self::Beta,
        Self::GeneralizedBeta,
        Self::BinomialMoments,
        Self::BinomialMax,
        Self::NegativeBinomial,
        Self::Poisson,
        Self::Uniform,
        Self::Triangular,
        Self::Logistic,
        Self::Laplace,
    ];
}

impl ParameterEstimator for Estimator {
    fn name(&self) -> &'static str {
        match self {
            Self::Exponential => "Exponential MLE",
            Self::Normal => "Normal MLE",
            Self::Lognormal => "Lognormal MLE",
            Self::GammaMoments => "Gamma MOM",
            Self::GammaMle => "Gamma MLE",
            Self::WeibullMle => "Weibull MLE",
            Self::WeibullPercentile => "Weibull Percentile",
            Self::Beta => "Beta MOM",
            Self::GeneralizedBeta => "Generalized Beta MOM",
            Self::BinomialMoments => "Binomial MOM",
            Self::BinomialMax => "Binomial Max",
            Self::NegativeBinomial => "Negative Binomial MOM",
            Self::Poisson => "Poisson MLE",
            Self::Uniform => "Uniform",
            Self::Triangular => "Triangular",
            Self::Logistic => "Logistic MOM",
            Self::Laplace => "Laplace MLE",
        }
    }

    fn family(&self) -> Family {
        match self {
            Self::Exponential => Family::Exponential,
            Self::Normal => Family::Normal,
            Self::Lognormal => Family::Lognormal,
            Self::GammaMoments | Self::GammaMle => Family::Gamma,
            Self::WeibullMle | Self::WeibullPercentile => Family::Weibull,
            Self::Beta => Family::Beta,
            Self::GeneralizedBeta => Family::GeneralizedBeta,
            Self::BinomialMoments | Self::BinomialMax => Family::Binomial,
            Self::NegativeBinomial => Family::NegativeBinomial,
            Self::Poisson => Family::Poisson,
            Self::Uniform => Family::Uniform,
            Self::Triangular => Family::Triangular,
            Self::Logistic => Family::Logistic,
            Self::Laplace => Family::Laplace,
        }
    }

    fn check_range(&self) -> bool {
        matches!(
            self,
            Self::Exponential
                | Self::Lognormal
                | Self::GammaMoments
                | Self::GammaMle
                | Self::WeibullMle
                | Self::WeibullPercentile
        )
    }

    fn fit(
        &self,
        data: &[f64],
        statistics: &StatisticSummary,
        config: &EstimatorConfig,
    ) -> Result<ParameterFit, EstimationFailure> {
        match self {
            Self::Exponential => exponential::estimate(data, statistics),
            Self::Normal => normal::estimate_normal(data, statistics),
            Self::Lognormal => normal::estimate_lognormal(data, statistics),
            Self::GammaMoments => gamma::estimate_moments(data, statistics),
            Self::GammaMle => gamma::estimate_mle(data, statistics, config),
            Self::WeibullMle => weibull::estimate_mle(data, statistics, config),
            Self::WeibullPercentile => weibull::estimate_percentile(data, statistics, config),
            Self::Beta => beta::estimate_beta(data, statistics),
            Self::GeneralizedBeta => beta::estimate_generalized(data, statistics),
            Self::BinomialMoments => binomial::estimate_moments(data, statistics),
            Self::BinomialMax => binomial::estimate_max_based(data, statistics),
            Self::NegativeBinomial => poisson::estimate_negative_binomial(data, statistics),
            Self::Poisson => poisson::estimate_poisson(data, statistics),
            Self::Uniform => uniform::estimate_uniform(data, statistics),
            Self::Triangular => uniform::estimate_triangular(data, statistics),
            Self::Logistic => logistic::estimate_logistic(data, statistics),
            Self::Laplace => logistic::estimate_laplace(data, statistics),
        }
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which estimator is used for each family
///
/// The default registry maps every [`Family`] to one estimator. Entries can
/// be replaced, e.g. to fit Weibull by percentiles instead of MLE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorRegistry {
    estimators: BTreeMap<Family, Estimator>,
}

impl Default for EstimatorRegistry {
    fn default() -> Self {
        let estimators = [
            Estimator::Exponential,
            Estimator::Normal,
            Estimator::Lognormal,
            Estimator::GammaMle,
            Estimator::WeibullMle,
            Estimator::Beta,
            Estimator::GeneralizedBeta,
            Estimator::BinomialMoments,
            Estimator::NegativeBinomial,
            Estimator::Poisson,
            Estimator::Uniform,
            Estimator::Triangular,
            Estimator::Logistic,
            Estimator::Laplace,
        ]
        .into_iter()
        .map(|e| (e.family(), e))
        .collect();
        Self { estimators }
    }
}

impl EstimatorRegistry {
    /// A registry with no entries
    pub fn empty() -> Self {
        Self {
            estimators: BTreeMap::new(),
        }
    }

    /// Only the given families, with their default estimators
    pub fn for_families(families: &[Family]) -> Self {
        let all = Self::default();
        let estimators = families
            .iter()
            .filter_map(|f| all.get(*f).map(|e| (*f, e)))
            .collect();
        Self { estimators }
    }

    /// Register `estimator` for its family, returning the one it replaced
    pub fn register(&mut self, estimator: Estimator) -> Option<Estimator> {
        self.estimators.insert(estimator.family(), estimator)
    }

    pub fn with(mut self, estimator: Estimator) -> Self {
        self.register(estimator);
        self
    }

    pub fn remove(&mut self, family: Family) -> Option<Estimator> {
        self.estimators.remove(&family)
    }

    pub fn get(&self, family: Family) -> Option<Estimator> {
        self.estimators.get(&family).copied()
    }

    pub fn len(&self) -> usize {
        self.estimators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimators.is_empty()
    }

    /// Estimators in family order
    pub fn iter(&self) -> impl Iterator<Item = Estimator> + '_ {
        self.estimators.values().copied()
    }
}
