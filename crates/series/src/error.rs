//! Error types for linkrain-series.

/// Error type for all fallible operations in the linkrain-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a series that must hold samples is empty.
    #[error("series '{name}' is empty")]
    Empty {
        /// Name of the offending series.
        name: String,
    },
}
