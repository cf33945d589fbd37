//! Statistics engine error types

use thiserror::Error;

/// Errors raised by [`compute`](super::compute)
///
/// All of them are argument-validation failures detected before any
/// aggregation, so a caller never receives partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// One or more referenced fields are not in the dataset
    #[error("Missing field(s) in dataset: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// The baseline value never occurs in the time field
    #[error("Baseline '{baseline}' not found in time field '{field}'")]
    BaselineNotFound { baseline: String, field: String },

    /// Unsupported summary statistic name
    #[error("Invalid summary statistic '{value}': expected one of mean, mean_se, median, boxplot")]
    InvalidSummaryStatistic { value: String },

    /// The outcome field is not numeric
    #[error("Outcome field '{field}' is not numeric")]
    NonNumericOutcome { field: String },

    /// Confidence level outside (0, 1)
    #[error("Invalid confidence level {level}: must be strictly between 0 and 1")]
    InvalidConfidenceLevel { level: f64 },

    /// Writing the summary table failed
    #[error("Export error: {0}")]
    Export(String),
}
