//! Bracketing root finders
//!
//! Used by maximum-likelihood estimators whose score equations have no
//! closed form, and by inverse CDFs of distributions that only expose a CDF.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default absolute precision on |f(x)|
pub const DEFAULT_DESIRED_PRECISION: f64 = 1e-7;

/// Default cap on bisection iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default cap on bracket expansion iterations
pub const DEFAULT_MAX_EXPANSIONS: usize = 50;

/// Default growth factor used when expanding a bracket
pub const DEFAULT_EXPANSION_FACTOR: f64 = 1.6;

/// Closed interval `[lower, upper]` searched for a root
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Create an interval, ordering the end points
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// Interval of half-width `half_width` around `center`
    pub fn centered(center: f64, half_width: f64) -> Self {
        Self::new(center - half_width.abs(), center + half_width.abs())
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }

    /// Raise the lower end to at least `floor`, keeping the interval non-empty
    pub fn floor_lower(self, floor: f64) -> Self {
        let lower = self.lower.max(floor);
        let upper = if self.upper <= lower { lower + lower.abs().max(1.0) } else { self.upper };
        Self { lower, upper }
    }
}

/// Tolerances and budgets for root finding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootFinderConfig {
    pub desired_precision: f64,
    pub max_iterations: usize,
    pub max_expansions: usize,
    pub expansion_factor: f64,
}

impl Default for RootFinderConfig {
    fn default() -> Self {
        Self {
            desired_precision: DEFAULT_DESIRED_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            expansion_factor: DEFAULT_EXPANSION_FACTOR,
        }
    }
}

impl RootFinderConfig {
    /// Set the desired precision
    pub fn with_desired_precision(mut self, precision: f64) -> Self {
        assert!(precision > 0.0, "Desired precision must be positive");
        self.desired_precision = precision;
        self
    }

    /// Set the bisection iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "Maximum iterations must be positive");
        self.max_iterations = max_iterations;
        self
    }

    /// Set the bracket expansion budget
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

/// Outcome of a root search
///
/// When `converged` is false the search ran out of iterations and `root`
/// holds the last iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    pub root: f64,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// True when `f` changes sign (or vanishes) over the interval
pub fn has_root<F>(f: F, interval: Interval) -> bool
where
    F: Fn(f64) -> f64,
{
    let fa = f(interval.lower);
    let fb = f(interval.upper);
    fa.is_finite() && fb.is_finite() && fa * fb <= 0.0
}

/// Expand `interval` outward until it brackets a root of `f`
///
/// Each step grows the end whose function value is smaller in magnitude,
/// never letting the lower end drop below `lower_floor`. Returns `None`
/// when the expansion budget is exhausted without a sign change.
pub fn find_interval<F>(
    f: F,
    interval: Interval,
    lower_floor: Option<f64>,
    config: &RootFinderConfig,
) -> Option<Interval>
where
    F: Fn(f64) -> f64,
{
    let floor = lower_floor.unwrap_or(f64::NEG_INFINITY);
    let mut a = interval.lower.max(floor);
    let mut b = interval.upper;
    if b <= a {
        return None;
    }
    let mut fa = f(a);
    let mut fb = f(b);

    for step in 0..=config.max_expansions {
        if fa.is_finite() && fb.is_finite() && fa * fb <= 0.0 {
            debug!(step, lower = a, upper = b, "bracketed root");
            return Some(Interval::new(a, b));
        }
        if step == config.max_expansions {
            break;
        }
        let width = b - a;
        let grow_lower = a > floor && (!fa.is_finite() || (fb.is_finite() && fa.abs() < fb.abs()));
        if grow_lower {
            let candidate = a - config.expansion_factor * width;
            // halve the distance to the floor instead of crossing it
            a = if candidate <= floor { 0.5 * (a + floor) } else { candidate };
            fa = f(a);
        } else {
            b += config.expansion_factor * width;
            fb = f(b);
        }
    }
    debug!(lower = a, upper = b, "no sign change found");
    None
}

/// Bisection over a bracketing interval
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionRootFinder {
    config: RootFinderConfig,
}

impl BisectionRootFinder {
    pub fn new(config: RootFinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RootFinderConfig {
        &self.config
    }

    /// Search for a root of `f` in `interval`
    ///
    /// Converges when |f| drops below the desired precision. Fails only when
    /// the interval does not bracket a root. Running out of iterations, or
    /// shrinking the bracket to adjacent floats first, is reported through
    /// [`RootResult::converged`] with the last iterate.
    pub fn solve<F>(&self, f: F, interval: Interval) -> Result<RootResult>
    where
        F: Fn(f64) -> f64,
    {
        let mut a = interval.lower;
        let mut b = interval.upper;
        let mut fa = f(a);
        let fb = f(b);
        if !(fa.is_finite() && fb.is_finite()) || fa * fb > 0.0 {
            return Err(Error::InvalidInput(format!(
                "Interval [{a}, {b}] does not bracket a root"
            )));
        }
        if fa == 0.0 {
            return Ok(RootResult { root: a, value: 0.0, iterations: 0, converged: true });
        }
        if fb == 0.0 {
            return Ok(RootResult { root: b, value: 0.0, iterations: 0, converged: true });
        }

        let precision = self.config.desired_precision;
        let mut mid = 0.5 * (a + b);
        let mut fm = f(mid);
        for iteration in 1..=self.config.max_iterations {
            mid = 0.5 * (a + b);
            fm = f(mid);
            if fm.abs() < precision {
                return Ok(RootResult { root: mid, value: fm, iterations: iteration, converged: true });
            }
            // the bracket cannot shrink any further
            if mid <= a || mid >= b {
                debug!(root = mid, value = fm, "bisection bracket collapsed");
                return Ok(RootResult { root: mid, value: fm, iterations: iteration, converged: false });
            }
            if fa * fm < 0.0 {
                b = mid;
            } else {
                a = mid;
                fa = fm;
            }
        }
        debug!(root = mid, value = fm, "bisection iteration budget exhausted");
        Ok(RootResult {
            root: mid,
            value: fm,
            iterations: self.config.max_iterations,
            converged: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_has_root() {
        let f = |x: f64| x * x - 2.0;
        assert!(has_root(f, Interval::new(0.0, 2.0)));
        assert!(!has_root(f, Interval::new(2.0, 3.0)));
    }

    #[test]
    fn test_bisection_sqrt_two() {
        let finder = BisectionRootFinder::default();
        let result = finder.solve(|x| x * x - 2.0, Interval::new(0.0, 2.0)).unwrap();
        assert!(result.converged);
        assert_abs_diff_eq!(result.root, 2f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_bisection_requires_bracket() {
        let finder = BisectionRootFinder::default();
        assert!(finder.solve(|x| x * x + 1.0, Interval::new(-1.0, 1.0)).is_err());
    }

    #[test]
    fn test_budget_exhaustion_returns_last_iterate() {
        let config = RootFinderConfig::default()
            .with_desired_precision(1e-300)
            .with_max_iterations(5);
        let finder = BisectionRootFinder::new(config);
        let result = finder.solve(|x| x - 0.3, Interval::new(0.0, 1.0)).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 5);
        assert!((result.root - 0.3).abs() < 0.05);
    }

    #[test]
    fn test_converged_only_when_value_is_small() {
        let finder = BisectionRootFinder::default();
        let precision = finder.config().desired_precision;
        let result = finder.solve(|x| 1e9 * (x - 0.3), Interval::new(0.0, 1.0)).unwrap();
        assert_eq!(result.converged, result.value.abs() < precision);
        assert_abs_diff_eq!(result.root, 0.3, epsilon = 1e-12);

        // a jump never gets below the precision, however narrow the bracket
        let step = |x: f64| if x < 0.3 { -1.0 } else { 1.0 };
        let result = finder.solve(step, Interval::new(0.0, 1.0)).unwrap();
        assert!(!result.converged);
        assert_eq!(result.value.abs(), 1.0);
        assert_abs_diff_eq!(result.root, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_find_interval_expands_both_ways() {
        let config = RootFinderConfig::default();
        let up = find_interval(|x| x - 50.0, Interval::new(0.0, 1.0), None, &config).unwrap();
        assert!(up.contains(50.0));

        let down = find_interval(|x| x + 50.0, Interval::new(0.0, 1.0), None, &config).unwrap();
        assert!(down.contains(-50.0));
    }

    #[test]
    fn test_find_interval_respects_floor() {
        let config = RootFinderConfig::default();
        let bracket = find_interval(|x| x - 0.001, Interval::new(1.0, 2.0), Some(0.0), &config).unwrap();
        assert!(bracket.lower > 0.0);
        assert!(bracket.contains(0.001));

        assert!(find_interval(|x| x + 5.0, Interval::new(1.0, 2.0), Some(0.0), &config).is_none());
    }
}
