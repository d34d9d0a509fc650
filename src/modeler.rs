//! End-to-end fitting: estimate every family, score the fits, rank them

use pdfit_confidence::{Bootstrap, DEFAULT_RESAMPLES};
use pdfit_core::{Error, ExecutionStrategy, Family, Result, StatisticSummary};
use pdfit_estimate::{EstimationResult, Estimator, EstimatorConfig, EstimatorRegistry, ParameterEstimator};
use pdfit_histogram::HistogramConfig;
use pdfit_ranking::{Ranking, RankingConfig, RankingMethod, ScoreTable, TableKind};
use pdfit_scoring::models::{ParameterMseModel, DEFAULT_BOOTSTRAP_SEED};
use pdfit_scoring::{Candidate, Metric, Scorer, ScoringResult};
use std::fmt;
use tracing::{debug, info, instrument};

/// Settings of one fitting session
#[derive(Debug, Clone)]
pub struct ModelerConfig {
    pub registry: EstimatorRegistry,
    pub estimator: EstimatorConfig,
    /// Shift families bounded at zero onto the data before estimating
    pub automatic_shift: bool,
    pub metrics: Vec<Metric>,
    pub histogram: HistogramConfig,
    /// Resamples for the parameter-MSE metric
    pub bootstrap_resamples: usize,
    pub bootstrap_seed: u64,
    pub ranking: RankingConfig,
    pub strategy: ExecutionStrategy,
}

impl Default for ModelerConfig {
    fn default() -> Self {
        Self {
            registry: EstimatorRegistry::default(),
            estimator: EstimatorConfig::default(),
            automatic_shift: true,
            metrics: Metric::ALL.to_vec(),
            histogram: HistogramConfig::default(),
            bootstrap_resamples: DEFAULT_RESAMPLES,
            bootstrap_seed: DEFAULT_BOOTSTRAP_SEED,
            ranking: RankingConfig::default(),
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl ModelerConfig {
    /// Fit only `families`, each with its default estimator
    pub fn with_families(mut self, families: &[Family]) -> Self {
        self.registry = EstimatorRegistry::for_families(families);
        self
    }

    pub fn with_registry(mut self, registry: EstimatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use `estimator` for its family, replacing the current choice
    pub fn with_estimator(mut self, estimator: Estimator) -> Self {
        self.registry.register(estimator);
        self
    }

    pub fn with_estimator_config(mut self, config: EstimatorConfig) -> Self {
        self.estimator = config;
        self
    }

    pub fn with_automatic_shift(mut self, enabled: bool) -> Self {
        self.automatic_shift = enabled;
        self
    }

    /// Score with `metrics`, in the given order
    pub fn with_metrics(mut self, metrics: &[Metric]) -> Self {
        assert!(!metrics.is_empty(), "At least one metric is required");
        self.metrics = metrics.to_vec();
        self
    }

    pub fn with_histogram(mut self, histogram: HistogramConfig) -> Self {
        self.histogram = histogram;
        self
    }

    pub fn with_bootstrap_resamples(mut self, resamples: usize) -> Self {
        assert!(resamples > 0, "Number of resamples must be positive");
        self.bootstrap_resamples = resamples;
        self
    }

    pub fn with_bootstrap_seed(mut self, seed: u64) -> Self {
        self.bootstrap_seed = seed;
        self
    }

    pub fn with_ranking(mut self, ranking: RankingConfig) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Fits a configured set of families to samples
#[derive(Debug)]
pub struct Modeler {
    config: ModelerConfig,
    scorer: Scorer,
}

impl Default for Modeler {
    fn default() -> Self {
        Self::new(ModelerConfig::default())
    }
}

impl Modeler {
    pub fn new(config: ModelerConfig) -> Self {
        let bootstrap = Bootstrap::default()
            .with_resamples(config.bootstrap_resamples)
            .with_seed(config.bootstrap_seed)
            .with_strategy(config.strategy);
        let parameter_mse = ParameterMseModel::new(bootstrap, config.estimator.clone());
        let scorer = Scorer::for_metrics(&config.metrics, config.histogram, &parameter_mse)
            .with_strategy(config.strategy);
        Self { config, scorer }
    }

    pub fn config(&self) -> &ModelerConfig {
        &self.config
    }

    /// Estimate one family per registry entry
    ///
    /// Failures are returned as unsuccessful results; one family failing
    /// never stops the others.
    pub fn estimate(&self, data: &[f64], statistics: &StatisticSummary) -> Vec<EstimationResult> {
        let estimators: Vec<Estimator> = self.config.registry.iter().collect();
        self.config.strategy.map(&estimators, |estimator| {
            let result = if self.config.automatic_shift {
                estimator.estimate_shifted(data, statistics, &self.config.estimator)
            } else {
                estimator.estimate(data, statistics, &self.config.estimator)
            };
            if !result.success() {
                debug!(estimator = estimator.name(), message = result.message(), "estimation failed");
            }
            result
        })
    }

    /// Fit, score and rank every configured family
    #[instrument(skip(self, data), fields(n = data.len(), families = self.config.registry.len()))]
    pub fn fit(&self, data: &[f64]) -> Result<FitReport> {
        if data.is_empty() {
            return Err(Error::empty_input("fit"));
        }
        if data.iter().any(|x| !x.is_finite()) {
            return Err(Error::non_finite("sample"));
        }

        let statistics = StatisticSummary::of(data);
        let estimations = self.estimate(data, &statistics);

        let mut candidates = Vec::new();
        for (estimator, estimation) in self.config.registry.iter().zip(&estimations) {
            if let Some(candidate) = Candidate::new(estimator, estimation.clone()) {
                candidates.push(candidate);
            }
        }
        debug!(
            attempted = estimations.len(),
            candidates = candidates.len(),
            "estimated families"
        );

        let results: Vec<ScoringResult> = self.scorer.score_all(data, candidates);
        let ranking = Ranking::new(results, &self.config.ranking);
        if let Some(best) = ranking.best() {
            info!(best = best.label(), distribution = %best.distribution(), "fit complete");
        }

        Ok(FitReport {
            statistics,
            estimations,
            ranking,
        })
    }
}

/// Everything learned from one sample
#[derive(Debug, Clone)]
pub struct FitReport {
    statistics: StatisticSummary,
    estimations: Vec<EstimationResult>,
    ranking: Ranking,
}

impl FitReport {
    pub fn statistics(&self) -> &StatisticSummary {
        &self.statistics
    }

    /// One result per attempted family, successful or not
    pub fn estimations(&self) -> &[EstimationResult] {
        &self.estimations
    }

    pub fn failures(&self) -> impl Iterator<Item = &EstimationResult> {
        self.estimations.iter().filter(|e| !e.success())
    }

    pub fn estimation(&self, family: Family) -> Option<&EstimationResult> {
        self.estimations.iter().find(|e| e.family() == family)
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    /// Scored candidates, best first
    pub fn results(&self) -> &[ScoringResult] {
        self.ranking.results()
    }

    pub fn best(&self) -> Option<&ScoringResult> {
        self.ranking.best()
    }

    /// 1-based position of `family`, 0 when it was not ranked
    pub fn rank_of_family(&self, family: Family, method: RankingMethod) -> usize {
        self.ranking.rank_of_family(family, method)
    }

    pub fn table(&self, kind: TableKind) -> ScoreTable {
        self.ranking.table(kind)
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.statistics)?;
        writeln!(f)?;
        for estimation in &self.estimations {
            writeln!(f, "  {estimation}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.table(TableKind::Scores))
    }
}
