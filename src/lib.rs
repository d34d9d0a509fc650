//! Parametric distribution fitting
//!
//! `pdfit` estimates a set of candidate distribution families from a sample,
//! scores every fit with several goodness-of-fit metrics and ranks the
//! candidates with a weighted multi-criteria model.
//!
//! - [`pdfit_core`]: statistics, families, fitted distributions, root finding
//! - [`pdfit_histogram`]: equal-probability histograms and expected counts
//! - [`pdfit_estimate`]: per-family parameter estimators and the shift estimator
//! - [`pdfit_confidence`]: bootstrap engine and confidence intervals
//! - [`pdfit_scoring`]: scoring models and goodness-of-fit tests
//! - [`pdfit_ranking`]: value functions, weighted and average-rank orderings
//!
//! The [`Modeler`] runs the whole pipeline:
//!
//! ```rust,no_run
//! use pdfit::{Family, Modeler, ModelerConfig, RankingMethod, TableKind};
//!
//! let data = vec![1.2, 0.4, 2.7, 0.9, 3.1, 0.2, 1.8, 0.6, 4.4, 1.1];
//! let modeler = Modeler::new(
//!     ModelerConfig::default().with_families(&[Family::Exponential, Family::Gamma, Family::Normal]),
//! );
//! let report = modeler.fit(&data).unwrap();
//! println!("{}", report.table(TableKind::Scores));
//! let position = report.rank_of_family(Family::Gamma, RankingMethod::WeightedValue);
//! ```

mod modeler;

pub use modeler::{FitReport, Modeler, ModelerConfig};

pub use pdfit_confidence;
pub use pdfit_core;
pub use pdfit_estimate;
pub use pdfit_histogram;
pub use pdfit_ranking;
pub use pdfit_scoring;

pub use pdfit_core::{Error, ExecutionStrategy, Family, FittedDistribution, Result, StatisticSummary};
pub use pdfit_estimate::{EstimationResult, Estimator, EstimatorConfig, EstimatorRegistry};
pub use pdfit_ranking::{Ranking, RankingConfig, RankingMethod, ScoreTable, TableKind};
pub use pdfit_scoring::{Metric, Score, ScoringResult};
