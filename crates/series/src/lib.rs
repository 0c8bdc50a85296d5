//! # linkrain-series
//!
//! Timestamped series shared by every linkrain stage. Timestamps are `i64`
//! Unix seconds from ingestion onwards; missing samples are `f64::NAN`.
//!
//! | Type | Role |
//! |------|------|
//! | [`PointSeries`] | Validated `(timestamp, value)` stream |
//! | [`TimeWindow`] | Closed interval; intersection of two series' ranges |
//! | [`Coord`] | (lon, lat) position with haversine distance |

mod coord;
mod error;
mod point;
mod validate;
mod window;

pub use coord::Coord;
pub use error::SeriesError;
pub use point::PointSeries;
pub use validate::{ValidationCollector, validate_length, validate_strictly_increasing};
pub use window::{TimeWindow, apply_mask};
