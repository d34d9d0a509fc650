//! Parameter estimation for distribution families
//!
//! Each supported [`Family`](pdfit_core::Family) has at least one
//! [`ParameterEstimator`]. Estimators never panic on bad data: they return an
//! [`EstimationResult`] whose outcome is either the fitted
//! [`Parameters`](pdfit_core::Parameters) or an [`EstimationFailure`]
//! explaining which precondition was violated.
//!
//! Families bounded below at zero (exponential, lognormal, gamma, Weibull)
//! can first be moved by a [`ShiftEstimator`] so that data starting away
//! from zero is still fitted well.
//!
//! # Example
//!
//! ```rust
//! use pdfit_core::{Family, StatisticSummary};
//! use pdfit_estimate::{EstimatorConfig, EstimatorRegistry, ParameterEstimator};
//!
//! let data = [2.1, 3.4, 1.9, 5.0, 2.8, 4.2, 3.3];
//! let summary = StatisticSummary::of(&data);
//! let registry = EstimatorRegistry::default();
//!
//! let normal = registry.get(Family::Normal).unwrap();
//! let result = normal.estimate(&data, &summary, &EstimatorConfig::default());
//! assert!(result.success());
//! assert_eq!(result.parameters().unwrap().get("mean"), Some(summary.mean));
//! ```

pub mod config;
pub mod families;
mod registry;
mod shift;
mod traits;
mod types;

pub use config::EstimatorConfig;
pub use registry::{Estimator, EstimatorRegistry};
pub use shift::ShiftEstimator;
pub use traits::ParameterEstimator;
pub use types::{EstimationFailure, EstimationResult, ParameterFit, ShiftedData};
