//! Error types for linkrain-gauge.

/// Error type for all fallible operations in the linkrain-gauge crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaugeError {
    /// Returned when averaging is requested over an empty gauge set.
    #[error("no gauges to average")]
    NoGauges,

    /// Returned when the grid step is not positive.
    #[error("grid step must be > 0 seconds, got {step}")]
    InvalidStep {
        /// The invalid step.
        step: i64,
    },

    /// Returned when the pre-binning group size is zero.
    #[error("bin size must be >= 1, got {bin_size}")]
    InvalidBinSize {
        /// The invalid bin size.
        bin_size: usize,
    },

    /// Wraps an error from the linkrain-series crate.
    #[error("series error: {reason}")]
    Series {
        /// Description of the underlying series failure.
        reason: String,
    },
}

impl From<linkrain_series::SeriesError> for GaugeError {
    fn from(e: linkrain_series::SeriesError) -> Self {
        GaugeError::Series {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkrain_series::SeriesError;

    #[test]
    fn display_no_gauges() {
        assert_eq!(GaugeError::NoGauges.to_string(), "no gauges to average");
    }

    #[test]
    fn display_invalid_step() {
        let e = GaugeError::InvalidStep { step: 0 };
        assert_eq!(e.to_string(), "grid step must be > 0 seconds, got 0");
    }

    #[test]
    fn display_invalid_bin_size() {
        let e = GaugeError::InvalidBinSize { bin_size: 0 };
        assert_eq!(e.to_string(), "bin size must be >= 1, got 0");
    }

    #[test]
    fn from_series_error() {
        let e: GaugeError = SeriesError::Empty {
            name: "gauge".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "series error: series 'gauge' is empty");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<GaugeError>();
    }
}
