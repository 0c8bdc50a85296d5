//! Error types for linkrain-wetdry.

/// Error type for all fallible operations in the linkrain-wetdry crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WetDryError {
    /// Returned when a link has no gauge reference to align against.
    #[error("no reference available")]
    NoReference,

    /// Returned when a required input holds no samples.
    #[error("{name} is empty")]
    EmptyInput {
        /// Name of the empty input.
        name: &'static str,
    },

    /// Returned when a detector stream does not match the link time axis.
    #[error("{name} length {got} does not match link time length {expected}")]
    MisalignedLength {
        /// Name of the misaligned stream.
        name: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when the link and reference share no time range.
    #[error("link and reference do not overlap in time")]
    NoOverlap,

    /// Returned when a classification value is not exactly 0 or 1.
    #[error("classification value {value} at index {index} is not 0 or 1")]
    InvalidInput {
        /// Index of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when a detector is configured with invalid parameters.
    #[error("invalid detector config: {reason}")]
    InvalidConfig {
        /// Description of the invalid parameter.
        reason: String,
    },

    /// Wraps an error from the linkrain-series crate.
    #[error("series error: {reason}")]
    Series {
        /// Description of the underlying series failure.
        reason: String,
    },
}

impl From<linkrain_series::SeriesError> for WetDryError {
    fn from(e: linkrain_series::SeriesError) -> Self {
        WetDryError::Series {
            reason: e.to_string(),
        }
    }
}
