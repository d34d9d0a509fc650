//! The scoring model contract

use crate::candidate::Candidate;
use crate::types::{Direction, Metric, Score, ScoreRange};

/// Scores how well a candidate distribution fits a sample
///
/// One implementation exists per [`Metric`]. Implementations report a
/// metric they cannot compute by returning `None` from
/// [`statistic`](Self::statistic); [`score`](Self::score) turns that into
/// the metric's worst-value sentinel.
pub trait ScoringModel: Send + Sync {
    fn metric(&self) -> Metric;

    fn range(&self) -> ScoreRange {
        self.metric().range()
    }

    fn direction(&self) -> Direction {
        self.metric().direction()
    }

    /// Raw statistic for `candidate` on `data`
    fn statistic(&self, data: &[f64], candidate: &Candidate) -> Option<f64>;

    fn score(&self, data: &[f64], candidate: &Candidate) -> Score {
        if data.is_empty() {
            return Score::invalid(self.metric());
        }
        match self.statistic(data, candidate) {
            Some(value) if value.is_finite() => Score::new(self.metric(), value),
            _ => Score::invalid(self.metric()),
        }
    }
}
