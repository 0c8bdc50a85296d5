//! # linkrain-gauge
//!
//! Builds the rain-gauge reference for a microwave link.
//!
//! ```text
//! GaugeNetwork::new()          drop all-missing gauges
//!   └─ find_near(center, r)    haversine radius search
//!        └─ average_gauges()   union grid → bounded linear interp → NaN-aware mean
//!             └─ bin_mean()    optional fixed-count pre-binning
//! ```

mod aggregate;
mod binning;
mod error;
mod interpolate;
mod network;
mod sensor;

pub use aggregate::{AveragedGauge, DEFAULT_STEP_SECONDS, average_gauges};
pub use binning::bin_mean;
pub use error::GaugeError;
pub use network::GaugeNetwork;
pub use sensor::GaugeSensor;
