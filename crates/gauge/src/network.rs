//! Gauge network with radius search around a point.

use linkrain_series::Coord;
use tracing::{debug, info};

use crate::sensor::GaugeSensor;

/// The set of usable gauges available to the link pipeline.
///
/// Construction drops gauges whose values are all missing, so that one dead
/// station never reaches the averaging stage.
#[derive(Debug, Clone, Default)]
pub struct GaugeNetwork {
    gauges: Vec<GaugeSensor>,
    n_dropped: usize,
}

impl GaugeNetwork {
    pub fn new(gauges: Vec<GaugeSensor>) -> Self {
        let n_total = gauges.len();
        let gauges: Vec<GaugeSensor> = gauges
            .into_iter()
            .filter(|g| {
                let keep = !g.series().is_all_missing();
                if !keep {
                    debug!(gauge = g.id(), "skipping gauge: all values missing");
                }
                keep
            })
            .collect();

        let n_dropped = n_total - gauges.len();
        if n_dropped > 0 {
            info!(
                n_total,
                n_valid = gauges.len(),
                n_dropped,
                "skipped gauges with all-missing data"
            );
        }

        Self { gauges, n_dropped }
    }

    /// Usable gauges, in input order.
    pub fn gauges(&self) -> &[GaugeSensor] {
        &self.gauges
    }

    /// Number of usable gauges.
    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// Number of gauges dropped at construction.
    pub fn n_dropped(&self) -> usize {
        self.n_dropped
    }

    /// Gauges within `radius_m` metres of `point`, nearest first.
    ///
    /// Returns `(distance_m, gauge)` pairs. Equal distances keep input order.
    pub fn find_near(&self, point: Coord, radius_m: f64) -> Vec<(f64, &GaugeSensor)> {
        let mut near: Vec<(f64, &GaugeSensor)> = self
            .gauges
            .iter()
            .map(|g| (point.distance_m(&g.location()), g))
            .filter(|(d, _)| *d <= radius_m)
            .collect();
        near.sort_by(|a, b| a.0.total_cmp(&b.0));
        near
    }
}
