//! Multi-criteria ranking of scored distribution fits
//!
//! Every metric is mapped onto `[0, 1]` by a [`ValueFunction`] fitted over
//! the candidates' valid scores: the best score is worth 1, the worst and
//! any invalid score 0. A candidate's weighted value is the weighted sum of
//! its values under [`RankingConfig`] (equal weights by default) and the
//! [`Ranking`] sorts candidates by it, best first.
//!
//! As a cross-check the ranking also records each candidate's average
//! ordinal rank across metrics, with ties sharing their mean rank. In
//! clear-cut cases both orderings put the same candidate first.
//!
//! ```rust,no_run
//! use pdfit_core::{Family, StatisticSummary};
//! use pdfit_estimate::{Estimator, EstimatorConfig, ParameterEstimator};
//! use pdfit_ranking::{Ranking, RankingConfig, RankingMethod, TableKind};
//! use pdfit_scoring::{Candidate, Scorer};
//!
//! let data = vec![1.2, 0.4, 2.7, 0.9, 3.1, 0.2, 1.8, 0.6, 4.4, 1.1];
//! let stats = StatisticSummary::of(&data);
//! let candidates: Vec<Candidate> = [Estimator::Exponential, Estimator::GammaMle, Estimator::Normal]
//!     .into_iter()
//!     .filter_map(|e| Candidate::new(e, e.estimate(&data, &stats, &EstimatorConfig::default())))
//!     .collect();
//!
//! let scored = Scorer::default().score_all(&data, candidates);
//! let ranking = Ranking::new(scored, &RankingConfig::default());
//! println!("{}", ranking.table(TableKind::Scores));
//! let position = ranking.rank_of_family(Family::Gamma, RankingMethod::AverageRank);
//! ```

mod config;
mod ranking;
mod table;
mod value;

pub use config::RankingConfig;
pub use ranking::{Ranking, RankingMethod};
pub use table::{ScoreRow, ScoreTable, TableKind};
pub use value::ValueFunction;
