//! Bootstrap confidence intervals for fitted parameters
//!
//! The [`Bootstrap`] engine resamples a data set with replacement, re-runs a
//! parameter estimator on every resample and reports, per parameter, the
//! bias, variance, mean squared error and a confidence interval built by a
//! [`BootstrapMethod`]. The root sum of the parameter MSEs is the quality
//! measure used by the parameter-MSE scoring model.
//!
//! # Example
//!
//! ```rust
//! use pdfit_confidence::Bootstrap;
//!
//! let data: Vec<f64> = (1..=50).map(f64::from).collect();
//! let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;
//!
//! let estimate = Bootstrap::default()
//!     .with_resamples(199)
//!     .with_seed(42)
//!     .statistic(&data, "mean", mean)
//!     .unwrap();
//!
//! assert!(estimate.interval.contains(25.5));
//! println!("{estimate}");
//! ```

mod bootstrap;
mod methods;
mod types;

pub use bootstrap::{
    Bootstrap, BootstrapEstimate, BootstrapResult, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_RESAMPLES,
};
pub use methods::{BiasCorrectedBootstrap, BootstrapMethod, PercentileBootstrap};
pub use types::{ConfidenceInterval, ConfidenceLevel};
