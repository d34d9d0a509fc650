//! Estimator configuration

use pdfit_core::RootFinderConfig;
use serde::{Deserialize, Serialize};

/// Default tolerance below which a shift or shape is treated as zero
pub const DEFAULT_ZERO_TOLERANCE: f64 = 0.001;

/// Default number of Newton steps for the Weibull MLE
pub const DEFAULT_NEWTON_STEPS: usize = 10;

/// Default width of the Weibull MLE bisection interval
pub const DEFAULT_BISECTION_WIDTH: f64 = 10.0;

/// Default multiple of the moment-estimator standard error used to bracket
/// the Gamma MLE shape
pub const DEFAULT_GAMMA_INTERVAL_FACTOR: f64 = 2.0;

/// Sample size at which the Weibull percentile estimator switches to the
/// expanded percentile set
pub const DEFAULT_SAMPLE_SIZE_FACTOR: usize = 20;

/// Tuning shared by all estimators
///
/// Passed explicitly to every `estimate` call so that estimators stay pure
/// and can run in parallel with different settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub zero_tolerance: f64,
    pub newton_steps: usize,
    pub bisection_width: f64,
    pub gamma_interval_factor: f64,
    pub sample_size_factor: usize,
    /// Lower-half percentiles for samples smaller than `sample_size_factor`
    pub reduced_percentiles: Vec<f64>,
    /// Lower-half percentiles for larger samples
    pub expanded_percentiles: Vec<f64>,
    pub root_finder: RootFinderConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            newton_steps: DEFAULT_NEWTON_STEPS,
            bisection_width: DEFAULT_BISECTION_WIDTH,
            gamma_interval_factor: DEFAULT_GAMMA_INTERVAL_FACTOR,
            sample_size_factor: DEFAULT_SAMPLE_SIZE_FACTOR,
            reduced_percentiles: vec![0.1, 0.2, 0.3, 0.4],
            expanded_percentiles: vec![0.05, 0.1, 0.15, 0.2, 0.25, 0.3, 0.35, 0.4, 0.45],
            root_finder: RootFinderConfig::default(),
        }
    }
}

impl EstimatorConfig {
    /// Set the zero tolerance
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        assert!(tolerance > 0.0, "Zero tolerance must be positive");
        self.zero_tolerance = tolerance;
        self
    }

    /// Set the number of Newton steps used by the Weibull MLE
    pub fn with_newton_steps(mut self, steps: usize) -> Self {
        self.newton_steps = steps;
        self
    }

    /// Set the width of the Weibull MLE bisection interval
    pub fn with_bisection_width(mut self, width: f64) -> Self {
        assert!(width > 0.0, "Bisection interval width must be positive");
        self.bisection_width = width;
        self
    }

    /// Set the Gamma MLE bracketing factor
    pub fn with_gamma_interval_factor(mut self, factor: f64) -> Self {
        assert!(factor > 0.0, "Interval factor must be positive");
        self.gamma_interval_factor = factor;
        self
    }

    /// Set both Weibull percentile sets
    pub fn with_percentiles(mut self, reduced: Vec<f64>, expanded: Vec<f64>) -> Self {
        let valid = |p: &f64| *p > 0.0 && *p < 0.5;
        assert!(
            !reduced.is_empty() && !expanded.is_empty(),
            "Percentile sets must not be empty"
        );
        assert!(
            reduced.iter().all(valid) && expanded.iter().all(valid),
            "Percentiles must lie in (0, 0.5)"
        );
        self.reduced_percentiles = reduced;
        self.expanded_percentiles = expanded;
        self
    }

    /// Set the root finder used by the maximum likelihood estimators
    pub fn with_root_finder(mut self, root_finder: RootFinderConfig) -> Self {
        self.root_finder = root_finder;
        self
    }

    /// Percentile set appropriate for a sample of size `n`
    pub fn percentiles_for(&self, n: usize) -> &[f64] {
        if n < self.sample_size_factor {
            &self.reduced_percentiles
        } else {
            &self.expanded_percentiles
        }
    }
}
