//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`SeriesError::Validation`], plus standalone helpers that
//! check the invariants of timestamped series.

use crate::error::SeriesError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`SeriesError::Validation`].
///
/// Create a collector, push zero or more messages, then call
/// [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every error of `other` into this collector.
    pub fn extend(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` when no errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(SeriesError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub fn finish(self) -> Result<(), SeriesError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SeriesError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that `other_len` matches the timestamp count.
pub fn validate_length(name: &str, other_len: usize, timestamps_len: usize) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    if other_len != timestamps_len {
        c.push(format!(
            "{name} length {other_len} != timestamps length {timestamps_len}"
        ));
    }
    c
}

/// Check that timestamps strictly increase.
///
/// Records one message per offending index; equal neighbours are reported as
/// duplicates.
pub fn validate_strictly_increasing(timestamps: &[i64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (i, w) in timestamps.windows(2).enumerate() {
        if w[1] == w[0] {
            c.push(format!("duplicate timestamp {} at index {}", w[1], i + 1));
        } else if w[1] < w[0] {
            c.push(format!(
                "timestamp {} at index {} precedes {}",
                w[1],
                i + 1,
                w[0]
            ));
        }
    }
    c
}
