//! Rain gauge point sensor.

use linkrain_series::{Coord, PointSeries};

/// A ground rain gauge: an identified, located rainfall series.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSensor {
    id: String,
    location: Coord,
    series: PointSeries,
}

impl GaugeSensor {
    pub fn new(id: impl Into<String>, location: Coord, series: PointSeries) -> Self {
        Self {
            id: id.into(),
            location,
            series,
        }
    }

    /// Station identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gauge position.
    pub fn location(&self) -> Coord {
        self.location
    }

    /// Rainfall series.
    pub fn series(&self) -> &PointSeries {
        &self.series
    }
}
