//! Histograms for goodness-of-fit testing
//!
//! This crate builds histograms over explicit break points and compares them
//! with a candidate distribution. Break points are either supplied by the
//! caller or chosen so that every bin has the same probability under the
//! candidate model (an "equalized" histogram), which is what chi-squared style
//! tests want.
//!
//! # Key Features
//!
//! - **Equalized break points**: equal-probability bins with at least five
//!   expected observations per bin where the sample allows
//! - **Sentinels**: extend break points to the model's support or to `±inf`
//! - **Model comparison**: bin probabilities, expected counts, chi-squared
//!   and sum-of-squared-error statistics
//!
//! # Example
//!
//! ```rust
//! use pdfit_core::{Family, FittedDistribution, Parameters};
//! use pdfit_histogram::{EqualizedBuilder, HistogramBuilder, HistogramOps};
//!
//! let params = Parameters::for_family(Family::Exponential, &[2.0]).unwrap();
//! let model = FittedDistribution::from_parameters(Family::Exponential, &params, 0.0).unwrap();
//!
//! let data: Vec<f64> = (1..=40).map(|i| i as f64 * 0.1).collect();
//! let histogram = EqualizedBuilder::new(&model).build(&data).unwrap();
//!
//! let expected = histogram.expected_counts(&model);
//! assert_eq!(expected.len(), histogram.len());
//! println!("chi-squared = {:.3}", histogram.chi_squared_statistic(&model));
//! ```

pub mod builders;
pub mod ops;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use builders::{
    add_lower_limit, add_negative_infinity, add_positive_infinity, add_upper_limit,
    equalized_break_points, BreakPointBuilder, EqualizedBuilder, HistogramConfig,
};
pub use ops::HistogramOps;
pub use traits::{HistogramBuilder, ProbabilityModel};
pub use types::{normalize_break_points, Histogram, HistogramBin};

pub use pdfit_core::Result;

/// Histogram of `data` over `break_points` extended to `±inf`
pub fn unbounded_histogram(data: &[f64], break_points: &[f64]) -> Result<Histogram> {
    BreakPointBuilder::unbounded(break_points)?.build(data)
}
