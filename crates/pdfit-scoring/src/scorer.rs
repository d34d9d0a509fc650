//! Scoring every candidate with a configured set of models

use crate::candidate::Candidate;
use crate::gof::{goodness_of_fit, GoodnessOfFit};
use crate::models::{
    AicModel, AndersonDarlingModel, BicModel, ChiSquaredModel, CramerVonMisesModel, MallowsL2Model,
    ParameterMseModel, PpSseModel, QqSseModel, SseModel, WatsonModel,
};
use crate::traits::ScoringModel;
use crate::types::{Metric, Score};
use pdfit_core::{ExecutionStrategy, Family, FittedDistribution};
use pdfit_estimate::EstimationResult;
use pdfit_histogram::HistogramConfig;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, instrument};

/// Scores of one candidate, later filled in by ranking
#[derive(Debug, Clone)]
pub struct ScoringResult {
    candidate: Candidate,
    pub scores: Vec<Score>,
    pub tests: Vec<GoodnessOfFit>,
    /// Per-metric values in `[0, 1]`, aligned with `scores`
    pub values: Vec<f64>,
    pub weighted_value: f64,
    pub average_rank: f64,
}

impl ScoringResult {
    pub fn new(candidate: Candidate, scores: Vec<Score>, tests: Vec<GoodnessOfFit>) -> Self {
        Self {
            candidate,
            scores,
            tests,
            values: Vec::new(),
            weighted_value: 0.0,
            average_rank: 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        self.candidate.label()
    }

    pub fn family(&self) -> Family {
        self.candidate.family()
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn distribution(&self) -> &FittedDistribution {
        self.candidate.distribution()
    }

    pub fn estimation(&self) -> &EstimationResult {
        self.candidate.estimation()
    }

    pub fn score(&self, metric: Metric) -> Option<&Score> {
        self.scores.iter().find(|s| s.metric == metric)
    }

    /// Weighted value descending, then label
    pub fn natural_order(&self, other: &Self) -> Ordering {
        other
            .weighted_value
            .total_cmp(&self.weighted_value)
            .then_with(|| self.label().cmp(other.label()))
    }
}

impl fmt::Display for ScoringResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label(), self.distribution())?;
        for score in &self.scores {
            write!(f, " {score}")?;
        }
        write!(f, " value={:.4} rank={:.2}", self.weighted_value, self.average_rank)
    }
}

/// Default model for `metric`
pub fn model_for(metric: Metric, histogram: HistogramConfig, parameter_mse: &ParameterMseModel) -> Box<dyn ScoringModel> {
    match metric {
        Metric::ChiSquared => Box::new(ChiSquaredModel::new(histogram)),
        Metric::AndersonDarling => Box::new(AndersonDarlingModel),
        Metric::CramerVonMises => Box::new(CramerVonMisesModel),
        Metric::Watson => Box::new(WatsonModel),
        Metric::Sse => Box::new(SseModel::new(histogram)),
        Metric::PpSse => Box::new(PpSseModel),
        Metric::QqSse => Box::new(QqSseModel),
        Metric::MallowsL2 => Box::new(MallowsL2Model),
        Metric::Aic => Box::new(AicModel),
        Metric::Bic => Box::new(BicModel),
        Metric::ParameterMse => Box::new(parameter_mse.clone()),
    }
}

/// Applies a set of scoring models to candidates
pub struct Scorer {
    models: Vec<Box<dyn ScoringModel>>,
    histogram: HistogramConfig,
    strategy: ExecutionStrategy,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::for_metrics(&Metric::ALL, HistogramConfig::default(), &ParameterMseModel::default())
    }
}

impl fmt::Debug for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorer")
            .field("metrics", &self.metrics())
            .field("histogram", &self.histogram)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl Scorer {
    /// A scorer with no models
    pub fn empty() -> Self {
        Self {
            models: Vec::new(),
            histogram: HistogramConfig::default(),
            strategy: ExecutionStrategy::default(),
        }
    }

    /// Default models for `metrics`, in the given order
    pub fn for_metrics(metrics: &[Metric], histogram: HistogramConfig, parameter_mse: &ParameterMseModel) -> Self {
        let mut scorer = Self::empty();
        scorer.histogram = histogram;
        for &metric in metrics {
            scorer = scorer.with_model(model_for(metric, histogram, parameter_mse));
        }
        scorer
    }

    /// Add a model, replacing any model for the same metric
    pub fn with_model(mut self, model: Box<dyn ScoringModel>) -> Self {
        match self.models.iter().position(|m| m.metric() == model.metric()) {
            Some(i) => self.models[i] = model,
            None => self.models.push(model),
        }
        self
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn metrics(&self) -> Vec<Metric> {
        self.models.iter().map(|m| m.metric()).collect()
    }

    /// Score one candidate with every model and run the goodness-of-fit tests
    #[instrument(skip(self, data, candidate), fields(candidate = candidate.label(), n = data.len()))]
    pub fn score(&self, data: &[f64], candidate: Candidate) -> ScoringResult {
        let scores: Vec<Score> = self.models.iter().map(|m| m.score(data, &candidate)).collect();
        let invalid = scores.iter().filter(|s| !s.valid).count();
        if invalid > 0 {
            debug!(invalid, "some metrics could not be computed");
        }
        let tests = goodness_of_fit(data, &candidate, &self.histogram);
        ScoringResult::new(candidate, scores, tests)
    }

    /// Score candidates, returning results in input order
    pub fn score_all(&self, data: &[f64], candidates: Vec<Candidate>) -> Vec<ScoringResult> {
        self.strategy.map(&candidates, |c| self.score(data, c.clone()))
    }
}
