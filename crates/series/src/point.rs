//! Timestamped scalar series.

use serde::Serialize;

use crate::error::SeriesError;
use crate::validate;
use crate::window::{TimeWindow, apply_mask};

/// A single sensor's time-stamped measurement stream.
///
/// Timestamps are Unix seconds and strictly increase. Values are `f64` with
/// NaN marking a missing sample, which is kept distinct from a true zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSeries {
    timestamps: Vec<i64>,
    values: Vec<f64>,
}

impl PointSeries {
    /// Creates a new `PointSeries` after validating inputs.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Validation`] if the lengths differ or the
    /// timestamps are not strictly increasing. All violations are reported
    /// together.
    pub fn new(timestamps: Vec<i64>, values: Vec<f64>) -> Result<Self, SeriesError> {
        let mut c = validate::validate_length("values", values.len(), timestamps.len());
        c.extend(validate::validate_strictly_increasing(&timestamps));
        c.finish()?;

        Ok(Self { timestamps, values })
    }

    /// Builds a series where `None` marks a missing sample.
    pub fn from_options(
        timestamps: Vec<i64>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, SeriesError> {
        let values = values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        Self::new(timestamps, values)
    }

    /// Returns the timestamps.
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Returns the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Returns `true` if the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// First timestamp.
    pub fn start(&self) -> Option<i64> {
        self.timestamps.first().copied()
    }

    /// Last timestamp.
    pub fn end(&self) -> Option<i64> {
        self.timestamps.last().copied()
    }

    /// Window covering the whole series.
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::spanning(&self.timestamps)
    }

    /// Number of non-missing values.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Returns `true` if every value is missing (or the series is empty).
    pub fn is_all_missing(&self) -> bool {
        self.valid_count() == 0
    }

    /// Samples whose timestamp lies inside `window`.
    pub fn slice_window(&self, window: &TimeWindow) -> PointSeries {
        let mask = window.mask(&self.timestamps);
        PointSeries {
            timestamps: apply_mask(&self.timestamps, &mask),
            values: apply_mask(&self.values, &mask),
        }
    }

    /// Iterator over `(timestamp, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.timestamps.iter().copied().zip(self.values.iter().copied())
    }

    /// Consumes self and returns `(timestamps, values)`.
    pub fn into_parts(self) -> (Vec<i64>, Vec<f64>) {
        (self.timestamps, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        let s = PointSeries::new(vec![0, 300, 600], vec![0.0, 1.5, f64::NAN]).unwrap();
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.start(), Some(0));
        assert_eq!(s.end(), Some(600));
        assert_eq!(s.valid_count(), 2);
        assert!(!s.is_all_missing());
    }

    #[test]
    fn new_length_mismatch_returns_error() {
        let result = PointSeries::new(vec![0, 300], vec![1.0]);
        assert!(matches!(result, Err(SeriesError::Validation { count: 1, .. })));
    }

    #[test]
    fn new_reports_every_violation() {
        let result = PointSeries::new(vec![0, 0, 300], vec![1.0]);
        match result {
            Err(SeriesError::Validation { count, details }) => {
                assert_eq!(count, 2);
                assert!(details.contains("values length 1"));
                assert!(details.contains("duplicate timestamp 0"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_series_is_allowed() {
        let s = PointSeries::new(vec![], vec![]).unwrap();
        assert!(s.is_empty());
        assert!(s.window().is_none());
        assert!(s.is_all_missing());
    }

    #[test]
    fn from_options_maps_none_to_nan() {
        let s = PointSeries::from_options(vec![0, 1], vec![Some(0.0), None]).unwrap();
        assert_eq!(s.values()[0], 0.0);
        assert!(s.values()[1].is_nan());
    }

    #[test]
    fn all_missing_detected() {
        let s = PointSeries::new(vec![0, 1], vec![f64::NAN, f64::NAN]).unwrap();
        assert!(s.is_all_missing());
    }

    #[test]
    fn slice_window_keeps_inside() {
        let s = PointSeries::new(vec![0, 300, 600, 900], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let w = TimeWindow::new(300, 600).unwrap();
        let sliced = s.slice_window(&w);
        assert_eq!(sliced.timestamps(), &[300, 600]);
        assert_eq!(sliced.values(), &[2.0, 3.0]);
    }

    #[test]
    fn iter_and_into_parts() {
        let s = PointSeries::new(vec![10, 20], vec![1.0, 2.0]).unwrap();
        let pairs: Vec<_> = s.iter().collect();
        assert_eq!(pairs, vec![(10, 1.0), (20, 2.0)]);
        let (t, v) = s.into_parts();
        assert_eq!(t, vec![10, 20]);
        assert_eq!(v, vec![1.0, 2.0]);
    }
}
