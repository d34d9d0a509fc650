//! Metrics and scores

use serde::Serialize;
use std::fmt;

/// Whether smaller or larger raw values indicate a better fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    SmallerIsBetter,
    LargerIsBetter,
}

/// Closed range of values a metric can take
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub lower: f64,
    pub upper: f64,
}

impl ScoreRange {
    pub const NON_NEGATIVE: Self = Self {
        lower: 0.0,
        upper: f64::INFINITY,
    };

    pub const UNBOUNDED: Self = Self {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Goodness-of-fit metrics with a scoring model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    ChiSquared,
    AndersonDarling,
    CramerVonMises,
    Watson,
    Sse,
    PpSse,
    QqSse,
    MallowsL2,
    Aic,
    Bic,
    ParameterMse,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Self::ChiSquared,
        Self::AndersonDarling,
        Self::CramerVonMises,
        Self::Watson,
        Self::Sse,
        Self::PpSse,
        Self::QqSse,
        Self::MallowsL2,
        Self::Aic,
        Self::Bic,
        Self::ParameterMse,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ChiSquared => "Chi-Squared",
            Self::AndersonDarling => "Anderson-Darling",
            Self::CramerVonMises => "Cramer-von Mises",
            Self::Watson => "Watson",
            Self::Sse => "SSE",
            Self::PpSse => "PP-SSE",
            Self::QqSse => "QQ-SSE",
            Self::MallowsL2 => "Mallows-L2",
            Self::Aic => "AIC",
            Self::Bic => "BIC",
            Self::ParameterMse => "Parameter-MSE",
        }
    }

    /// Short column header for tables
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::ChiSquared => "CHI2",
            Self::AndersonDarling => "AD",
            Self::CramerVonMises => "CVM",
            Self::Watson => "WAT",
            Self::Sse => "SSE",
            Self::PpSse => "PP",
            Self::QqSse => "QQ",
            Self::MallowsL2 => "L2",
            Self::Aic => "AIC",
            Self::Bic => "BIC",
            Self::ParameterMse => "PMSE",
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::SmallerIsBetter
    }

    pub fn range(&self) -> ScoreRange {
        match self {
            Self::Aic | Self::Bic => ScoreRange::UNBOUNDED,
            _ => ScoreRange::NON_NEGATIVE,
        }
    }

    /// Value reported when a metric cannot be computed
    ///
    /// The worst end of the range, replaced by `±f64::MAX` when that end is
    /// infinite so scores stay finite.
    pub fn worst_value(&self) -> f64 {
        let range = self.range();
        let worst = match self.direction() {
            Direction::SmallerIsBetter => range.upper,
            Direction::LargerIsBetter => range.lower,
        };
        if worst == f64::INFINITY {
            f64::MAX
        } else if worst == f64::NEG_INFINITY {
            f64::MIN
        } else {
            worst
        }
    }

    /// True when `a` is a strictly better value than `b`
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        match self.direction() {
            Direction::SmallerIsBetter => a < b,
            Direction::LargerIsBetter => a > b,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of one metric for one candidate
///
/// Invalid scores carry the metric's worst value and never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub metric: Metric,
    pub value: f64,
    pub direction: Direction,
    pub valid: bool,
}

impl Score {
    /// A computed score; non-finite values become invalid
    pub fn new(metric: Metric, value: f64) -> Self {
        if value.is_finite() {
            Self {
                metric,
                value,
                direction: metric.direction(),
                valid: true,
            }
        } else {
            Self::invalid(metric)
        }
    }

    pub fn invalid(metric: Metric) -> Self {
        Self {
            metric,
            value: metric.worst_value(),
            direction: metric.direction(),
            valid: false,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "{}={:.6}", self.metric.abbreviation(), self.value)
        } else {
            write!(f, "{}=invalid", self.metric.abbreviation())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worst_values_are_finite() {
        for metric in Metric::ALL {
            assert!(metric.worst_value().is_finite());
            let score = Score::new(metric, f64::NAN);
            assert!(!score.valid);
            assert_eq!(score.value, metric.worst_value());
        }
        assert_eq!(Metric::Aic.worst_value(), f64::MAX);
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::new(Metric::AndersonDarling, 0.25).to_string(), "AD=0.250000");
        assert_eq!(Score::invalid(Metric::Bic).to_string(), "BIC=invalid");
    }

    #[test]
    fn test_is_better() {
        assert!(Metric::QqSse.is_better(1.0, 2.0));
        assert!(!Metric::QqSse.is_better(2.0, 2.0));
        assert!(ScoreRange::NON_NEGATIVE.contains(0.0));
        assert!(!ScoreRange::NON_NEGATIVE.contains(-1.0));
    }
}
