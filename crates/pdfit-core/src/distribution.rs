//! Distribution adapter used by the scoring engine
//!
//! [`Model`] wraps the `statrs` implementation of each family (or a closed
//! form where `statrs` has none) behind the small surface the fitting engine
//! consumes: CDF, density, inverse CDF, support and log-likelihood.
//! [`FittedDistribution`] adds the location shift estimated before fitting.

use crate::family::{Family, Parameters};
use crate::root::{find_interval, BisectionRootFinder, Interval, RootFinderConfig};
use crate::{Error, Result};
use statrs::distribution::{
    Beta, Binomial, Continuous, ContinuousCDF, Discrete, DiscreteCDF, Exp, Gamma, LogNormal,
    NegativeBinomial, Normal, Poisson, Triangular, Uniform, Weibull,
};
use statrs::function::gamma::gamma;
use std::fmt;

/// Tolerance for treating a floating point observation as an integer
const INTEGER_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
enum Kind {
    Exponential(Exp),
    Normal(Normal),
    Lognormal(LogNormal),
    Gamma(Gamma),
    Weibull(Weibull),
    Beta(Beta),
    GeneralizedBeta { beta: Beta, min: f64, max: f64 },
    Binomial(Binomial),
    NegativeBinomial(NegativeBinomial),
    Poisson(Poisson),
    Uniform(Uniform),
    Triangular(Triangular),
    Logistic { location: f64, scale: f64 },
    Laplace { location: f64, scale: f64 },
}

/// A fully parameterised distribution of one [`Family`]
#[derive(Debug, Clone)]
pub struct Model {
    family: Family,
    parameters: Parameters,
    kind: Kind,
}

fn positive(family: Family, name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::distribution(family, format!("{name} must be positive, got {value}")))
    }
}

impl Model {
    /// Build a distribution from its named parameters
    pub fn from_parameters(family: Family, parameters: &Parameters) -> Result<Self> {
        let p = |name: &str| parameters.require(name);
        let wrap = |e: statrs::StatsError| Error::distribution(family, e);

        let kind = match family {
            Family::Exponential => {
                let mean = positive(family, "mean", p("mean")?)?;
                Kind::Exponential(Exp::new(1.0 / mean).map_err(wrap)?)
            }
            Family::Normal => {
                let variance = positive(family, "variance", p("variance")?)?;
                Kind::Normal(Normal::new(p("mean")?, variance.sqrt()).map_err(wrap)?)
            }
            Family::Lognormal => {
                let mean = positive(family, "mean", p("mean")?)?;
                let variance = positive(family, "variance", p("variance")?)?;
                let sigma2 = (1.0 + variance / (mean * mean)).ln();
                let mu = mean.ln() - 0.5 * sigma2;
                Kind::Lognormal(LogNormal::new(mu, sigma2.sqrt()).map_err(wrap)?)
            }
            Family::Gamma => {
                let shape = positive(family, "shape", p("shape")?)?;
                let scale = positive(family, "scale", p("scale")?)?;
                Kind::Gamma(Gamma::new(shape, 1.0 / scale).map_err(wrap)?)
            }
            Family::Weibull => {
                let shape = positive(family, "shape", p("shape")?)?;
                let scale = positive(family, "scale", p("scale")?)?;
                Kind::Weibull(Weibull::new(shape, scale).map_err(wrap)?)
            }
            Family::Beta => {
                let alpha = positive(family, "alpha", p("alpha")?)?;
                let beta = positive(family, "beta", p("beta")?)?;
                Kind::Beta(Beta::new(alpha, beta).map_err(wrap)?)
            }
            Family::GeneralizedBeta => {
                let alpha = positive(family, "alpha", p("alpha")?)?;
                let beta = positive(family, "beta", p("beta")?)?;
                let (min, max) = (p("min")?, p("max")?);
                if !(min < max) {
                    return Err(Error::distribution(family, "min must be less than max"));
                }
                Kind::GeneralizedBeta { beta: Beta::new(alpha, beta).map_err(wrap)?, min, max }
            }
            Family::Binomial => {
                let prob = p("probability")?;
                let trials = p("trials")?.round();
                if !(0.0..=1.0).contains(&prob) || trials < 1.0 {
                    return Err(Error::distribution(family, "probability must be in [0, 1] and trials >= 1"));
                }
                Kind::Binomial(Binomial::new(prob, trials as u64).map_err(wrap)?)
            }
            Family::NegativeBinomial => {
                let prob = p("probability")?;
                let successes = positive(family, "successes", p("successes")?)?;
                if !(prob > 0.0 && prob <= 1.0) {
                    return Err(Error::distribution(family, "probability must be in (0, 1]"));
                }
                Kind::NegativeBinomial(NegativeBinomial::new(successes, prob).map_err(wrap)?)
            }
            Family::Poisson => {
                let mean = positive(family, "mean", p("mean")?)?;
                Kind::Poisson(Poisson::new(mean).map_err(wrap)?)
            }
            Family::Uniform => Kind::Uniform(Uniform::new(p("min")?, p("max")?).map_err(wrap)?),
            Family::Triangular => {
                Kind::Triangular(Triangular::new(p("min")?, p("max")?, p("mode")?).map_err(wrap)?)
            }
            Family::Logistic => Kind::Logistic {
                location: p("location")?,
                scale: positive(family, "scale", p("scale")?)?,
            },
            Family::Laplace => Kind::Laplace {
                location: p("location")?,
                scale: positive(family, "scale", p("scale")?)?,
            },
        };

        Ok(Self {
            family,
            parameters: parameters.clone(),
            kind,
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn is_discrete(&self) -> bool {
        self.family.is_discrete()
    }

    /// Support of the distribution
    pub fn domain(&self) -> Interval {
        let inf = f64::INFINITY;
        match &self.kind {
            Kind::Exponential(_) | Kind::Lognormal(_) | Kind::Gamma(_) | Kind::Weibull(_) => {
                Interval::new(0.0, inf)
            }
            Kind::NegativeBinomial(_) | Kind::Poisson(_) => Interval::new(0.0, inf),
            Kind::Normal(_) | Kind::Logistic { .. } | Kind::Laplace { .. } => Interval::new(-inf, inf),
            Kind::Beta(_) => Interval::new(0.0, 1.0),
            Kind::GeneralizedBeta { min, max, .. } => Interval::new(*min, *max),
            Kind::Binomial(b) => Interval::new(0.0, b.n() as f64),
            Kind::Uniform(_) | Kind::Triangular(_) => {
                Interval::new(self.parameters.get("min").unwrap_or(-inf), self.parameters.get("max").unwrap_or(inf))
            }
        }
    }

    /// Cumulative distribution function `P(X <= x)`
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let domain = self.domain();
        if x < domain.lower {
            return 0.0;
        }
        if x >= domain.upper {
            return 1.0;
        }
        match &self.kind {
            Kind::Exponential(d) => d.cdf(x),
            Kind::Normal(d) => d.cdf(x),
            Kind::Lognormal(d) => d.cdf(x),
            Kind::Gamma(d) => d.cdf(x),
            Kind::Weibull(d) => d.cdf(x),
            Kind::Beta(d) => d.cdf(x),
            Kind::GeneralizedBeta { beta, min, max } => beta.cdf((x - min) / (max - min)),
            Kind::Uniform(d) => d.cdf(x),
            Kind::Triangular(d) => d.cdf(x),
            Kind::Logistic { location, scale } => 1.0 / (1.0 + (-(x - location) / scale).exp()),
            Kind::Laplace { location, scale } => {
                let z = (x - location) / scale;
                if z < 0.0 {
                    0.5 * z.exp()
                } else {
                    1.0 - 0.5 * (-z).exp()
                }
            }
            Kind::Binomial(d) => d.cdf(x.floor() as u64),
            Kind::NegativeBinomial(d) => d.cdf(x.floor() as u64),
            Kind::Poisson(d) => d.cdf(x.floor() as u64),
        }
    }

    /// Probability strictly below `x`, `P(X < x)`
    ///
    /// Equal to the CDF for continuous families; for integer-valued ones it
    /// excludes the mass at `x` so that half-open bins `[a, b)` add up.
    pub fn prob_below(&self, x: f64) -> f64 {
        if !self.is_discrete() || x.is_infinite() {
            return self.cdf(x);
        }
        let k = x.ceil() - 1.0;
        if k < 0.0 {
            0.0
        } else {
            self.cdf(k)
        }
    }

    /// Density (continuous) or probability mass (discrete) at `x`
    pub fn density(&self, x: f64) -> f64 {
        self.ln_density(x).exp()
    }

    /// Natural log of the density or mass at `x`; `-inf` outside the support
    pub fn ln_density(&self, x: f64) -> f64 {
        let domain = self.domain();
        if x.is_nan() || x < domain.lower || x > domain.upper {
            return f64::NEG_INFINITY;
        }
        if self.is_discrete() {
            if (x - x.round()).abs() > INTEGER_TOLERANCE {
                return f64::NEG_INFINITY;
            }
            let k = x.round() as u64;
            return match &self.kind {
                Kind::Binomial(d) => d.ln_pmf(k),
                Kind::NegativeBinomial(d) => d.ln_pmf(k),
                Kind::Poisson(d) => d.ln_pmf(k),
                _ => f64::NEG_INFINITY,
            };
        }
        match &self.kind {
            Kind::Exponential(d) => d.ln_pdf(x),
            Kind::Normal(d) => d.ln_pdf(x),
            Kind::Lognormal(d) => d.ln_pdf(x),
            Kind::Gamma(d) => d.ln_pdf(x),
            Kind::Weibull(d) => d.ln_pdf(x),
            Kind::Beta(d) => d.ln_pdf(x),
            Kind::GeneralizedBeta { beta, min, max } => beta.ln_pdf((x - min) / (max - min)) - (max - min).ln(),
            Kind::Uniform(d) => d.ln_pdf(x),
            Kind::Triangular(d) => d.ln_pdf(x),
            Kind::Logistic { location, scale } => {
                let z = -(x - location) / scale;
                // log(1 + e^z) without overflow
                let softplus = z.max(0.0) + (-z.abs()).exp().ln_1p();
                z - scale.ln() - 2.0 * softplus
            }
            Kind::Laplace { location, scale } => -(x - location).abs() / scale - (2.0 * scale).ln(),
            _ => f64::NEG_INFINITY,
        }
    }

    /// Inverse CDF: the smallest `x` with `F(x) >= p`
    pub fn inv_cdf(&self, p: f64) -> f64 {
        if !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        let domain = self.domain();
        if p == 0.0 {
            return domain.lower;
        }
        if p == 1.0 {
            return domain.upper;
        }
        let params = &self.parameters;
        match &self.kind {
            Kind::Exponential(d) => -(1.0 / d.rate()) * (-p).ln_1p(),
            Kind::Normal(d) => d.inverse_cdf(p),
            Kind::Lognormal(_) => {
                let mean = params.get("mean").unwrap_or(f64::NAN);
                let variance = params.get("variance").unwrap_or(f64::NAN);
                let sigma2 = (1.0 + variance / (mean * mean)).ln();
                let mu = mean.ln() - 0.5 * sigma2;
                let z = Normal::new(0.0, 1.0).map(|n| n.inverse_cdf(p)).unwrap_or(f64::NAN);
                (mu + sigma2.sqrt() * z).exp()
            }
            Kind::Weibull(d) => d.scale() * (-(-p).ln_1p()).powf(1.0 / d.shape()),
            Kind::Uniform(_) => domain.lower + p * domain.width(),
            Kind::Triangular(_) => {
                let (a, b) = (domain.lower, domain.upper);
                let c = params.get("mode").unwrap_or(a);
                let split = (c - a) / (b - a);
                if p < split {
                    a + (p * (b - a) * (c - a)).sqrt()
                } else {
                    b - ((1.0 - p) * (b - a) * (b - c)).sqrt()
                }
            }
            Kind::Logistic { location, scale } => location + scale * (p / (1.0 - p)).ln(),
            Kind::Laplace { location, scale } => {
                if p < 0.5 {
                    location + scale * (2.0 * p).ln()
                } else {
                    location - scale * (2.0 * (1.0 - p)).ln()
                }
            }
            Kind::Gamma(_) | Kind::Beta(_) | Kind::GeneralizedBeta { .. } => self.numeric_inverse(p),
            Kind::Binomial(_) | Kind::NegativeBinomial(_) | Kind::Poisson(_) => self.discrete_inverse(p),
        }
    }

    fn numeric_inverse(&self, p: f64) -> f64 {
        let domain = self.domain();
        let start = if domain.upper.is_finite() {
            domain
        } else {
            let spread = self.variance().sqrt().max(1.0);
            Interval::new(domain.lower, self.mean() + 4.0 * spread)
        };
        let config = RootFinderConfig::default()
            .with_desired_precision(1e-12)
            .with_max_iterations(200);
        let f = |x: f64| self.cdf(x) - p;
        let Some(bracket) = find_interval(f, start, Some(domain.lower), &config) else {
            return f64::NAN;
        };
        BisectionRootFinder::new(config)
            .solve(f, bracket)
            .map(|r| r.root)
            .unwrap_or(f64::NAN)
    }

    fn discrete_inverse(&self, p: f64) -> f64 {
        let mut hi = self.mean().max(1.0).ceil();
        let upper = self.domain().upper;
        while self.cdf(hi) < p {
            if hi >= upper {
                return upper;
            }
            hi = (hi * 2.0).min(upper);
        }
        let mut lo = -1.0;
        // invariant: cdf(lo) < p <= cdf(hi)
        while hi - lo > 1.0 {
            let mid = ((lo + hi) / 2.0).floor();
            if self.cdf(mid) >= p {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        hi
    }

    /// Mean of the distribution
    pub fn mean(&self) -> f64 {
        let p = |name: &str| self.parameters.get(name).unwrap_or(f64::NAN);
        match self.family {
            Family::Exponential | Family::Poisson | Family::Normal | Family::Lognormal => p("mean"),
            Family::Gamma => p("shape") * p("scale"),
            Family::Weibull => p("scale") * gamma(1.0 + 1.0 / p("shape")),
            Family::Beta => p("alpha") / (p("alpha") + p("beta")),
            Family::GeneralizedBeta => {
                p("min") + (p("max") - p("min")) * p("alpha") / (p("alpha") + p("beta"))
            }
            Family::Binomial => p("trials").round() * p("probability"),
            Family::NegativeBinomial => p("successes") * (1.0 - p("probability")) / p("probability"),
            Family::Uniform => 0.5 * (p("min") + p("max")),
            Family::Triangular => (p("min") + p("mode") + p("max")) / 3.0,
            Family::Logistic | Family::Laplace => p("location"),
        }
    }

    /// Variance of the distribution
    pub fn variance(&self) -> f64 {
        let p = |name: &str| self.parameters.get(name).unwrap_or(f64::NAN);
        match self.family {
            Family::Exponential => p("mean").powi(2),
            Family::Poisson => p("mean"),
            Family::Normal | Family::Lognormal => p("variance"),
            Family::Gamma => p("shape") * p("scale").powi(2),
            Family::Weibull => {
                let (k, l) = (p("shape"), p("scale"));
                l * l * (gamma(1.0 + 2.0 / k) - gamma(1.0 + 1.0 / k).powi(2))
            }
            Family::Beta | Family::GeneralizedBeta => {
                let (a, b) = (p("alpha"), p("beta"));
                let unit = a * b / ((a + b).powi(2) * (a + b + 1.0));
                if self.family == Family::Beta {
                    unit
                } else {
                    unit * (p("max") - p("min")).powi(2)
                }
            }
            Family::Binomial => p("trials").round() * p("probability") * (1.0 - p("probability")),
            Family::NegativeBinomial => {
                p("successes") * (1.0 - p("probability")) / p("probability").powi(2)
            }
            Family::Uniform => (p("max") - p("min")).powi(2) / 12.0,
            Family::Triangular => {
                let (a, c, b) = (p("min"), p("mode"), p("max"));
                (a * a + b * b + c * c - a * b - a * c - b * c) / 18.0
            }
            Family::Logistic => (p("scale") * std::f64::consts::PI).powi(2) / 3.0,
            Family::Laplace => 2.0 * p("scale").powi(2),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.family, self.parameters)
    }
}

/// A fitted model, possibly shifted right by the location estimated before
/// fitting: `X = shift + Y` with `Y ~ model`
#[derive(Debug, Clone)]
pub struct FittedDistribution {
    model: Model,
    shift: f64,
}

impl FittedDistribution {
    pub fn new(model: Model) -> Self {
        Self { model, shift: 0.0 }
    }

    pub fn shifted(model: Model, shift: f64) -> Self {
        Self { model, shift }
    }

    /// Build directly from a family and its parameters
    pub fn from_parameters(family: Family, parameters: &Parameters, shift: f64) -> Result<Self> {
        Ok(Self::shifted(Model::from_parameters(family, parameters)?, shift))
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn family(&self) -> Family {
        self.model.family()
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn is_discrete(&self) -> bool {
        self.model.is_discrete()
    }

    pub fn domain(&self) -> Interval {
        let d = self.model.domain();
        Interval::new(d.lower + self.shift, d.upper + self.shift)
    }

    pub fn cdf(&self, x: f64) -> f64 {
        self.model.cdf(x - self.shift)
    }

    pub fn prob_below(&self, x: f64) -> f64 {
        self.model.prob_below(x - self.shift)
    }

    pub fn density(&self, x: f64) -> f64 {
        self.model.density(x - self.shift)
    }

    pub fn ln_density(&self, x: f64) -> f64 {
        self.model.ln_density(x - self.shift)
    }

    pub fn inv_cdf(&self, p: f64) -> f64 {
        self.model.inv_cdf(p) + self.shift
    }

    pub fn mean(&self) -> f64 {
        self.model.mean() + self.shift
    }

    pub fn variance(&self) -> f64 {
        self.model.variance()
    }

    /// Sum of log densities over `data`; `-inf` if any value is outside the support
    pub fn sum_log_likelihood(&self, data: &[f64]) -> f64 {
        data.iter().map(|&x| self.ln_density(x)).sum()
    }
}

impl fmt::Display for FittedDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift == 0.0 {
            write!(f, "{}", self.model)
        } else {
            write!(f, "{:.6} + {}", self.shift, self.model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model(family: Family, values: &[f64]) -> Model {
        Model::from_parameters(family, &Parameters::for_family(family, values).unwrap()).unwrap()
    }

    #[test]
    fn test_continuous_inverse_roundtrip() {
        let models = [
            model(Family::Exponential, &[10.0]),
            model(Family::Normal, &[5.0, 4.0]),
            model(Family::Lognormal, &[3.0, 2.0]),
            model(Family::Gamma, &[2.5, 2.0]),
            model(Family::Weibull, &[1.5, 3.0]),
            model(Family::Beta, &[2.0, 5.0]),
            model(Family::GeneralizedBeta, &[2.0, 3.0, 10.0, 20.0]),
            model(Family::Uniform, &[1.0, 4.0]),
            model(Family::Triangular, &[0.0, 1.0, 4.0]),
            model(Family::Logistic, &[1.0, 2.0]),
            model(Family::Laplace, &[-1.0, 0.5]),
        ];
        for m in &models {
            for &p in &[0.05, 0.25, 0.5, 0.75, 0.95] {
                let x = m.inv_cdf(p);
                assert_relative_eq!(m.cdf(x), p, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_discrete_inverse_is_smallest_quantile() {
        let m = model(Family::Poisson, &[4.0]);
        for &p in &[0.01, 0.3, 0.5, 0.9, 0.999] {
            let k = m.inv_cdf(p);
            assert_eq!(k, k.round());
            assert!(m.cdf(k) >= p);
            assert!(k == 0.0 || m.cdf(k - 1.0) < p);
        }
        let b = model(Family::Binomial, &[0.3, 10.0]);
        assert!(b.inv_cdf(0.999_999) <= 10.0);
    }

    #[test]
    fn test_prob_below_discrete() {
        let m = model(Family::Poisson, &[2.0]);
        assert_relative_eq!(m.prob_below(0.0), 0.0);
        assert_relative_eq!(m.prob_below(1.0), m.cdf(0.0));
        assert_relative_eq!(m.prob_below(2.5), m.cdf(2.0));
    }

    #[test]
    fn test_moments() {
        let g = model(Family::Gamma, &[2.0, 3.0]);
        assert_relative_eq!(g.mean(), 6.0);
        assert_relative_eq!(g.variance(), 18.0);

        let ln = model(Family::Lognormal, &[3.0, 2.0]);
        assert_relative_eq!(ln.mean(), 3.0);

        let nb = model(Family::NegativeBinomial, &[0.5, 4.0]);
        assert_relative_eq!(nb.mean(), 4.0);
        assert_relative_eq!(nb.variance(), 8.0);
    }

    #[test]
    fn test_invalid_parameters_are_errors() {
        let bad = Parameters::for_family(Family::Gamma, &[-1.0, 2.0]).unwrap();
        assert!(Model::from_parameters(Family::Gamma, &bad).is_err());

        let bad = Parameters::for_family(Family::Uniform, &[2.0, 1.0]).unwrap();
        assert!(Model::from_parameters(Family::Uniform, &bad).is_err());
    }

    #[test]
    fn test_shifted_distribution() {
        let fitted = FittedDistribution::shifted(model(Family::Exponential, &[2.0]), 10.0);
        assert_relative_eq!(fitted.cdf(10.0), 0.0);
        assert_relative_eq!(fitted.mean(), 12.0);
        assert_eq!(fitted.domain().lower, 10.0);
        assert!(fitted.sum_log_likelihood(&[9.0, 11.0]).is_infinite());
        assert!(fitted.sum_log_likelihood(&[10.5, 11.0]).is_finite());
    }
}
