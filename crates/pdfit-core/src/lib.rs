//! Core types for distribution fitting
//!
//! This crate provides the pieces every other `pdfit` crate builds on:
//!
//! - [`Statistic`] / [`StatisticSummary`]: single-pass sample summaries
//! - [`Family`] / [`Parameters`]: the supported parametric families and
//!   their named parameters
//! - [`Model`] / [`FittedDistribution`]: CDF, density and inverse CDF of a
//!   parameterised family, optionally shifted
//! - [`root`]: bracketing and bisection root finders
//! - [`ExecutionStrategy`]: sequential or rayon-parallel batch execution
//! - [`Error`] / [`Result`]: the shared error type
//!
//! # Example
//!
//! ```rust
//! use pdfit_core::{Family, FittedDistribution, Parameters, StatisticSummary};
//!
//! let data = [1.2, 0.4, 2.2, 0.9, 3.1];
//! let summary = StatisticSummary::of(&data);
//!
//! let params = Parameters::for_family(Family::Exponential, &[summary.mean]).unwrap();
//! let fitted = FittedDistribution::from_parameters(Family::Exponential, &params, 0.0).unwrap();
//! assert!(fitted.cdf(summary.mean) > 0.5);
//! ```

pub mod distribution;
pub mod error;
pub mod execution;
pub mod family;
pub mod root;
pub mod special;
pub mod statistics;

pub use distribution::{FittedDistribution, Model};
pub use error::{Error, Result};
pub use execution::ExecutionStrategy;
pub use family::{Family, Parameters};
pub use root::{find_interval, has_root, BisectionRootFinder, Interval, RootFinderConfig, RootResult};
pub use special::bessel_k;
pub use statistics::{median_sorted, quantile_sorted, sorted, Statistic, StatisticSummary};
