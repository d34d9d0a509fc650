//! Distribution families and their named parameters

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// The parametric families the fitting engine knows how to estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Family {
    Exponential,
    Normal,
    Lognormal,
    Gamma,
    Weibull,
    Beta,
    GeneralizedBeta,
    Binomial,
    NegativeBinomial,
    Poisson,
    Uniform,
    Triangular,
    Logistic,
    Laplace,
}

impl Family {
    /// Every family, continuous first
    pub const ALL: [Family; 14] = [
        Family::Exponential,
        Family::Normal,
        Family::Lognormal,
        Family::Gamma,
        Family::Weibull,
        Family::Beta,
        Family::GeneralizedBeta,
        Family::Uniform,
        Family::Triangular,
        Family::Logistic,
        Family::Laplace,
        Family::Binomial,
        Family::NegativeBinomial,
        Family::Poisson,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Exponential => "Exponential",
            Self::Normal => "Normal",
            Self::Lognormal => "Lognormal",
            Self::Gamma => "Gamma",
            Self::Weibull => "Weibull",
            Self::Beta => "Beta",
            Self::GeneralizedBeta => "GeneralizedBeta",
            Self::Binomial => "Binomial",
            Self::NegativeBinomial => "NegativeBinomial",
            Self::Poisson => "Poisson",
            Self::Uniform => "Uniform",
            Self::Triangular => "Triangular",
            Self::Logistic => "Logistic",
            Self::Laplace => "Laplace",
        }
    }

    /// True for families supported on the non-negative integers
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Binomial | Self::NegativeBinomial | Self::Poisson)
    }

    /// Names of the parameters, in the order estimators report them
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            Self::Exponential | Self::Poisson => &["mean"],
            Self::Normal | Self::Lognormal => &["mean", "variance"],
            Self::Gamma | Self::Weibull => &["shape", "scale"],
            Self::Beta => &["alpha", "beta"],
            Self::GeneralizedBeta => &["alpha", "beta", "min", "max"],
            Self::Binomial => &["probability", "trials"],
            Self::NegativeBinomial => &["probability", "successes"],
            Self::Uniform => &["min", "max"],
            Self::Triangular => &["min", "mode", "max"],
            Self::Logistic | Self::Laplace => &["location", "scale"],
        }
    }

    /// Number of parameters estimated from data
    pub fn parameter_count(&self) -> usize {
        self.parameter_names().len()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered set of named parameter values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameters {
    values: Vec<(&'static str, f64)>,
}

impl Parameters {
    pub fn new(values: Vec<(&'static str, f64)>) -> Self {
        Self { values }
    }

    /// Build a parameter set for `family` from values in declaration order
    pub fn for_family(family: Family, values: &[f64]) -> Result<Self> {
        let names = family.parameter_names();
        if names.len() != values.len() {
            return Err(Error::InvalidParameter(format!(
                "{family} expects {} parameters, got {}",
                names.len(),
                values.len()
            )));
        }
        Ok(Self::new(names.iter().copied().zip(values.iter().copied()).collect()))
    }

    /// Value of the named parameter
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// Value of the named parameter or an error naming the missing key
    pub fn require(&self, name: &str) -> Result<f64> {
        self.get(name)
            .ok_or_else(|| Error::InvalidParameter(format!("missing parameter '{name}'")))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(n, _)| *n)
    }

    /// Parameter values in order
    pub fn values(&self) -> Vec<f64> {
        self.values.iter().map(|(_, v)| *v).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.values.iter().map(|(n, v)| format!("{n}={v:.6}")).collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_lookup() {
        let params = Parameters::for_family(Family::Gamma, &[2.0, 3.0]).unwrap();
        assert_eq!(params.get("shape"), Some(2.0));
        assert_eq!(params.get("scale"), Some(3.0));
        assert_eq!(params.get("rate"), None);
        assert!(params.require("rate").is_err());
        assert_eq!(params.values(), vec![2.0, 3.0]);
        assert_eq!(params.to_string(), "shape=2.000000, scale=3.000000");
    }

    #[test]
    fn test_parameter_count_mismatch() {
        assert!(Parameters::for_family(Family::Triangular, &[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_family_metadata() {
        assert!(Family::Poisson.is_discrete());
        assert!(!Family::Weibull.is_discrete());
        assert_eq!(Family::GeneralizedBeta.parameter_count(), 4);
        assert_eq!(Family::ALL.len(), 14);
    }
}
