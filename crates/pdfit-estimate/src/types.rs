//! Estimation results and failure reasons

use pdfit_core::{Family, FittedDistribution, Parameters, StatisticSummary};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

fn observations(n: &usize) -> String {
    match n {
        1 => "one observation".to_string(),
        2 => "two observations".to_string(),
        3 => "three observations".to_string(),
        n => format!("{n} observations"),
    }
}

/// Why an estimator could not produce trustworthy parameters
///
/// The `Display` text is the diagnostic message reported to users.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum EstimationFailure {
    #[error("There must be at least {}", observations(.required))]
    TooFewObservations { required: usize },

    #[error("The observations must be finite numbers")]
    NonFinite,

    #[error("Cannot fit {family} when some observations are less than {bound:.1}")]
    BelowLowerBound { family: Family, bound: f64 },

    #[error("Cannot fit {family} when some observations are less than or equal to 0.0")]
    NonPositiveValues { family: Family },

    #[error("Cannot fit {family} when observations lie outside [{lower}, {upper}]")]
    OutOfRange { family: Family, lower: f64, upper: f64 },

    #[error("Cannot fit {family} to observations that are not integers")]
    NonIntegerValues { family: Family },

    #[error("The observations were all equal")]
    AllEqual,

    #[error("The sample mean must be positive, got {mean}")]
    NonPositiveMean { mean: f64 },

    #[error("The sample variance must be positive, got {variance}")]
    NonPositiveVariance { variance: f64 },

    #[error("The sample mean ({mean}) must exceed the sample variance ({variance})")]
    MeanNotAboveVariance { mean: f64, variance: f64 },

    #[error("The sample variance ({variance}) must exceed the sample mean ({mean})")]
    VarianceNotAboveMean { mean: f64, variance: f64 },

    #[error("The maximum observation was 0.0")]
    ZeroMaximum,

    #[error("Estimated shape parameters were not positive: alpha={alpha}, beta={beta}")]
    NonPositiveShape { alpha: f64, beta: f64 },

    #[error("Numerical failure: {0}")]
    Numerical(String),

    /// The search ran out of budget; `parameters` is the best estimate found
    #[error("Did not converge: {reason}")]
    NotConverged { parameters: Parameters, reason: String },
}

/// Successful parameter estimate with an optional diagnostic note
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterFit {
    pub parameters: Parameters,
    pub note: Option<String>,
}

impl ParameterFit {
    pub fn new(parameters: Parameters) -> Self {
        Self { parameters, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Data moved left by an estimated shift: `data[i] = original[i] - shift`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftedData {
    pub shift: f64,
    #[serde(skip)]
    pub data: Arc<[f64]>,
}

impl ShiftedData {
    pub fn new(shift: f64, original: &[f64]) -> Self {
        Self {
            shift,
            data: original.iter().map(|x| x - shift).collect(),
        }
    }
}

/// Outcome of one estimator applied to one sample
///
/// Immutable once built. When [`success`](Self::success) is false the
/// parameters may still be present (a non-converged search), but they must
/// not be trusted without checking.
#[derive(Debug, Clone)]
pub struct EstimationResult {
    estimator: &'static str,
    family: Family,
    data: Arc<[f64]>,
    statistics: StatisticSummary,
    shifted: Option<ShiftedData>,
    outcome: Result<Parameters, EstimationFailure>,
    message: String,
}

impl EstimationResult {
    pub fn new(
        estimator: &'static str,
        family: Family,
        data: Arc<[f64]>,
        statistics: StatisticSummary,
        outcome: Result<ParameterFit, EstimationFailure>,
    ) -> Self {
        let (outcome, message) = match outcome {
            Ok(fit) => {
                let message = fit
                    .note
                    .unwrap_or_else(|| format!("Estimated {family} parameters: {}", fit.parameters));
                (Ok(fit.parameters), message)
            }
            Err(failure) => {
                let message = failure.to_string();
                (Err(failure), message)
            }
        };
        Self {
            estimator,
            family,
            data,
            statistics,
            shifted: None,
            outcome,
            message,
        }
    }

    /// Attach the shift applied before estimation
    pub fn with_shift(mut self, shifted: ShiftedData) -> Self {
        self.shifted = Some(shifted);
        self
    }

    pub fn estimator(&self) -> &'static str {
        self.estimator
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// The original, unshifted sample
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The data the estimator actually saw
    pub fn fitted_data(&self) -> &[f64] {
        self.shifted.as_ref().map_or(&self.data, |s| &s.data)
    }

    pub fn statistics(&self) -> &StatisticSummary {
        &self.statistics
    }

    pub fn shifted(&self) -> Option<&ShiftedData> {
        self.shifted.as_ref()
    }

    /// Shift to add back to the fitted model, zero when none was applied
    pub fn shift(&self) -> f64 {
        self.shifted.as_ref().map_or(0.0, |s| s.shift)
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn outcome(&self) -> &Result<Parameters, EstimationFailure> {
        &self.outcome
    }

    /// Parameters, including the best guess of a non-converged search
    pub fn parameters(&self) -> Option<&Parameters> {
        match &self.outcome {
            Ok(parameters) => Some(parameters),
            Err(EstimationFailure::NotConverged { parameters, .. }) => Some(parameters),
            Err(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&EstimationFailure> {
        self.outcome.as_ref().err()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The fitted distribution on the original scale, for successful results
    pub fn distribution(&self) -> Option<FittedDistribution> {
        let parameters = self.outcome.as_ref().ok()?;
        FittedDistribution::from_parameters(self.family, parameters, self.shift()).ok()
    }
}

impl fmt::Display for EstimationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success() { "ok" } else { "failed" };
        write!(f, "{} [{}]: {}", self.estimator, status, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let failure = EstimationFailure::TooFewObservations { required: 2 };
        assert_eq!(failure.to_string(), "There must be at least two observations");

        let failure = EstimationFailure::BelowLowerBound {
            family: Family::Poisson,
            bound: 0.0,
        };
        assert_eq!(
            failure.to_string(),
            "Cannot fit Poisson when some observations are less than 0.0"
        );
        assert_eq!(EstimationFailure::AllEqual.to_string(), "The observations were all equal");
    }

    #[test]
    fn test_not_converged_keeps_parameters() {
        let parameters = Parameters::for_family(Family::Weibull, &[1.5, 2.0]).unwrap();
        let data: Arc<[f64]> = Arc::from(vec![1.0, 2.0]);
        let result = EstimationResult::new(
            "Weibull MLE",
            Family::Weibull,
            data.clone(),
            StatisticSummary::of(&data),
            Err(EstimationFailure::NotConverged {
                parameters: parameters.clone(),
                reason: "bisection budget exhausted".to_string(),
            }),
        );
        assert!(!result.success());
        assert_eq!(result.parameters(), Some(&parameters));
        assert!(result.distribution().is_none());
        assert!(result.message().contains("Did not converge"));
    }

    #[test]
    fn test_shifted_result() {
        let original = [5.0, 6.0, 8.0];
        let parameters = Parameters::for_family(Family::Exponential, &[1.0]).unwrap();
        let result = EstimationResult::new(
            "Exponential MLE",
            Family::Exponential,
            Arc::from(original.to_vec()),
            StatisticSummary::of(&original),
            Ok(ParameterFit::new(parameters)),
        )
        .with_shift(ShiftedData::new(4.0, &original));

        assert_eq!(result.shift(), 4.0);
        assert_eq!(result.fitted_data(), &[1.0, 2.0, 4.0]);
        assert_eq!(result.data(), &original);
        let dist = result.distribution().unwrap();
        assert_eq!(dist.domain().lower, 4.0);
    }

    #[test]
    fn test_shift_record_omits_the_sample() {
        let shifted = ShiftedData::new(2.5, &[3.0, 4.0, 7.5]);
        let json = serde_json::to_value(&shifted).unwrap();
        assert_eq!(json, serde_json::json!({ "shift": 2.5 }));
    }
}
