//! Weighted-value and average-rank orderings of scored candidates

use crate::config::RankingConfig;
use crate::table::{ScoreTable, TableKind};
use crate::value::ValueFunction;
use ordered_float::OrderedFloat;
use pdfit_core::Family;
use pdfit_estimate::EstimationResult;
use pdfit_scoring::{Direction, Metric, Score, ScoringResult};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// Which ordering a position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RankingMethod {
    /// Descending weighted value
    #[default]
    WeightedValue,
    /// Ascending mean of the per-metric ordinal ranks
    AverageRank,
}

/// Scored candidates of one fitting session, ordered best first
#[derive(Debug, Clone)]
pub struct Ranking {
    metrics: Vec<Metric>,
    weights: Vec<f64>,
    results: Vec<ScoringResult>,
}

impl Ranking {
    /// Fill in values, weighted values and average ranks, then sort by
    /// weighted value
    #[instrument(skip(results, config), fields(candidates = results.len()))]
    pub fn new(mut results: Vec<ScoringResult>, config: &RankingConfig) -> Self {
        let metrics = metrics_of(&results);
        let weights = config.normalised(&metrics);
        for result in results.iter_mut() {
            result.values = vec![0.0; metrics.len()];
        }

        for (j, &metric) in metrics.iter().enumerate() {
            let function = ValueFunction::fit(metric, results.iter().filter_map(|r| r.score(metric)));
            for result in results.iter_mut() {
                let value = match (&function, result.score(metric)) {
                    (Some(f), Some(score)) => f.value(score),
                    _ => 0.0,
                };
                result.values[j] = value;
            }
        }
        for result in results.iter_mut() {
            result.weighted_value = result.values.iter().zip(&weights).map(|(v, w)| v * w).sum();
        }

        assign_average_ranks(&mut results, &metrics);
        results.sort_by(|a, b| a.natural_order(b));

        if let Some(best) = results.first() {
            debug!(
                best = best.label(),
                value = best.weighted_value,
                average_rank = best.average_rank,
                "ranked candidates"
            );
        }
        Self {
            metrics,
            weights,
            results,
        }
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Normalised weights, aligned with [`metrics`](Self::metrics)
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Results in weighted-value order
    pub fn results(&self) -> &[ScoringResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ScoringResult> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn best(&self) -> Option<&ScoringResult> {
        self.results.first()
    }

    /// Results in the order of `method`
    pub fn ordered(&self, method: RankingMethod) -> Vec<&ScoringResult> {
        let mut ordered: Vec<&ScoringResult> = self.results.iter().collect();
        if method == RankingMethod::AverageRank {
            ordered.sort_by(|a, b| {
                OrderedFloat(a.average_rank)
                    .cmp(&OrderedFloat(b.average_rank))
                    .then_with(|| a.natural_order(b))
            });
        }
        ordered
    }

    /// 1-based position of the result produced by `estimation`, 0 if absent
    pub fn rank_of_result(&self, estimation: &EstimationResult, method: RankingMethod) -> usize {
        self.position(method, |r| {
            r.label() == estimation.estimator() && r.family() == estimation.family()
        })
    }

    /// 1-based position of the result labelled `label`, 0 if absent
    pub fn rank_of_label(&self, label: &str, method: RankingMethod) -> usize {
        self.position(method, |r| r.label() == label)
    }

    /// 1-based position of the best result of `family`, 0 if absent
    pub fn rank_of_family(&self, family: Family, method: RankingMethod) -> usize {
        self.position(method, |r| r.family() == family)
    }

    pub fn table(&self, kind: TableKind) -> ScoreTable {
        ScoreTable::new(self, kind)
    }

    fn position(&self, method: RankingMethod, matches: impl Fn(&ScoringResult) -> bool) -> usize {
        self.ordered(method)
            .into_iter()
            .position(matches)
            .map_or(0, |i| i + 1)
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, result) in self.results.iter().enumerate() {
            writeln!(f, "{:>3}. {result}", i + 1)?;
        }
        Ok(())
    }
}

/// Every scored metric, in first-seen order
fn metrics_of(results: &[ScoringResult]) -> Vec<Metric> {
    let mut metrics: Vec<Metric> = Vec::new();
    for score in results.iter().flat_map(|r| &r.scores) {
        if !metrics.contains(&score.metric) {
            metrics.push(score.metric);
        }
    }
    metrics
}

/// Sort key putting better scores first and invalid scores last
fn rank_key(score: Option<&Score>) -> (bool, OrderedFloat<f64>) {
    match score {
        Some(s) if s.valid => {
            let oriented = match s.direction {
                Direction::SmallerIsBetter => s.value,
                Direction::LargerIsBetter => -s.value,
            };
            (false, OrderedFloat(oriented))
        }
        _ => (true, OrderedFloat(0.0)),
    }
}

/// Ordinal ranks per metric with tied candidates sharing their mean rank
pub(crate) fn ordinal_ranks(keys: &[(bool, OrderedFloat<f64>)]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by_key(|&i| keys[i]);

    let mut ranks = vec![0.0; keys.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && keys[order[end]] == keys[order[start]] {
            end += 1;
        }
        // positions start+1 ..= end share their mean
        let shared = (start + end + 1) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = shared;
        }
        start = end;
    }
    ranks
}

fn assign_average_ranks(results: &mut [ScoringResult], metrics: &[Metric]) {
    if metrics.is_empty() {
        return;
    }
    let mut totals = vec![0.0; results.len()];
    for &metric in metrics {
        let keys: Vec<_> = results.iter().map(|r| rank_key(r.score(metric))).collect();
        for (total, rank) in totals.iter_mut().zip(ordinal_ranks(&keys)) {
            *total += rank;
        }
    }
    for (result, total) in results.iter_mut().zip(totals) {
        result.average_rank = total / metrics.len() as f64;
    }
}
