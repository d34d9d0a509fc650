//! Error types for distribution fitting
//!
//! These errors are reserved for caller bugs and contract violations.
//! Bad data is not an error: estimators report it through
//! `EstimationFailure` values and scorers through sentinel scores.

use thiserror::Error;

/// Core error type shared by all pdfit crates
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// A distribution could not be built from the supplied parameters
    #[error("Cannot build {family} distribution: {reason}")]
    Distribution { family: String, reason: String },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for a probability outside [0, 1]
    pub fn invalid_probability(p: f64) -> Self {
        Self::InvalidParameter(format!("Probability {p} must be in [0, 1]"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a distribution that rejected its parameters
    pub fn distribution(family: impl ToString, reason: impl ToString) -> Self {
        Self::Distribution {
            family: family.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<statrs::StatsError> for Error {
    fn from(err: statrs::StatsError) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("alpha must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: alpha must be positive");

        let err = Error::InsufficientData { expected: 10, actual: 5 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 10 samples, got 5"
        );

        let err = Error::distribution("Gamma", "shape must be positive");
        assert_eq!(
            err.to_string(),
            "Cannot build Gamma distribution: shape must be positive"
        );
    }

    #[test]
    fn test_error_helper_functions() {
        match Error::empty_input("bootstrap") {
            Error::InsufficientData { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("Wrong error type"),
        }

        let err = Error::invalid_probability(1.5);
        assert_eq!(err.to_string(), "Invalid parameter: Probability 1.5 must be in [0, 1]");

        let err = Error::non_finite("input data");
        assert_eq!(
            err.to_string(),
            "Computation error: input data contains NaN or infinite values"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        match err {
            Error::Other(_) => assert!(err.to_string().contains("custom error message")),
            _ => panic!("Wrong error type"),
        }
    }
}
