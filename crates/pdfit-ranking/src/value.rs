//! Value functions mapping raw scores onto `[0, 1]`

use pdfit_scoring::{Direction, Metric, Score};

/// Linear value function over the observed range of one metric
///
/// The best valid score maps to 1 and the worst to 0. Invalid scores and
/// values outside the metric's declared range clamp to 0. When every valid
/// score is equal they all map to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueFunction {
    metric: Metric,
    best: f64,
    worst: f64,
}

impl ValueFunction {
    /// Fit over the valid scores of `metric`; `None` when there are none
    pub fn fit<'a>(metric: Metric, scores: impl IntoIterator<Item = &'a Score>) -> Option<Self> {
        let range = metric.range();
        let mut bounds: Option<(f64, f64)> = None;
        for score in scores {
            if score.metric != metric || !score.valid || !range.contains(score.value) {
                continue;
            }
            let (lo, hi) = bounds.unwrap_or((score.value, score.value));
            bounds = Some((lo.min(score.value), hi.max(score.value)));
        }
        let (lo, hi) = bounds?;
        let (best, worst) = match metric.direction() {
            Direction::SmallerIsBetter => (lo, hi),
            Direction::LargerIsBetter => (hi, lo),
        };
        Some(Self { metric, best, worst })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn value(&self, score: &Score) -> f64 {
        if !score.valid || !self.metric.range().contains(score.value) {
            return 0.0;
        }
        let span = self.worst - self.best;
        if span == 0.0 {
            return if score.value == self.best { 1.0 } else { 0.0 };
        }
        ((self.worst - score.value) / span).clamp(0.0, 1.0)
    }
}
