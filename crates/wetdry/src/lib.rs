//! # linkrain-wetdry
//!
//! Wet/dry detection on link attenuation and its alignment with a gauge
//! reference.
//!
//! ```text
//! WetDryDetector::detect(attenuation) -> DetectorOutput
//!   └─ align_detection(link_times, output, reference, config)
//!        ├─ trim trailing samples
//!        ├─ mask both sides to TimeWindow::intersect
//!        └─ nearest_resample() onto reference timestamps
//! ```
//!
//! Any type implementing `Fn(&[f64]) -> DetectorOutput` is a detector, so an
//! external classifier can be plugged in as a closure.

mod align;
mod config;
mod detector;
mod error;
mod nearest;

pub use align::{AlignedDetection, align_detection};
pub use config::{AlignConfig, DEFAULT_TRAILING_TRIM};
pub use detector::{DetectorOutput, RollingStdDetector, WetDryDetector};
pub use error::WetDryError;
pub use nearest::nearest_resample;
