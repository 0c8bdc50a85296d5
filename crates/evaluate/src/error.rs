//! Evaluation error types.

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluateError {
    /// One or more validation checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation { count: usize, details: String },

    /// A required input holds no samples.
    #[error("{name} is empty")]
    EmptyInput { name: &'static str },

    /// Values and timestamps of one stream differ in length.
    #[error("{name} length {got} does not match its {expected} timestamps")]
    MisalignedLength {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    /// A predicted value is not exactly 0 or 1.
    #[error("predicted value {value} at index {index} is not 0 or 1")]
    InvalidInput { index: usize, value: f64 },

    /// A configuration value is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<linkrain_series::SeriesError> for EvaluateError {
    fn from(e: linkrain_series::SeriesError) -> Self {
        match e {
            linkrain_series::SeriesError::Validation { count, details } => {
                EvaluateError::Validation { count, details }
            }
            other => EvaluateError::Validation {
                count: 1,
                details: other.to_string(),
            },
        }
    }
}
