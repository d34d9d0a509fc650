//! Goodness-of-fit scoring for fitted distributions
//!
//! Each [`Metric`] has one [`ScoringModel`] that turns a sample and a
//! [`Candidate`] into a [`Score`]. Scores are raw statistics (smaller is
//! better for every built-in metric); a metric that cannot be computed
//! yields an invalid score carrying the metric's worst value instead of an
//! error or NaN.
//!
//! | Metric | Statistic |
//! |---|---|
//! | Chi-Squared | Pearson statistic on an equal-probability histogram |
//! | Anderson-Darling, Cramer-von Mises, Watson | EDF statistics of `F(x₍ᵢ₎)` |
//! | SSE | squared error between bin fractions and bin probabilities |
//! | PP-SSE, QQ-SSE, Mallows-L2 | probability and quantile plot discrepancies |
//! | AIC, BIC | information criteria |
//! | Parameter-MSE | `√Σ MSE` of bootstrap re-estimates |
//!
//! The [`gof`] module turns the same statistics into p-values using the
//! null distributions in [`asymptotic`].

pub mod asymptotic;
mod candidate;
pub mod gof;
pub mod models;
mod scorer;
mod traits;
mod types;

pub use candidate::Candidate;
pub use gof::{GofTest, GoodnessOfFit};
pub use scorer::{model_for, Scorer, ScoringResult};
pub use traits::ScoringModel;
pub use types::{Direction, Metric, Score, ScoreRange};
