//! NaN-aware averaging of several gauges onto one common grid.

use std::borrow::Borrow;

use linkrain_series::{Coord, PointSeries};
use tracing::debug;

use crate::error::GaugeError;
use crate::interpolate::linear_bounded;
use crate::sensor::GaugeSensor;

/// Grid step used when the link's own sampling interval cannot be detected.
pub const DEFAULT_STEP_SECONDS: i64 = 300;

/// One reference series built from every gauge near a link.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedGauge {
    series: PointSeries,
    location: Coord,
    step: i64,
    n_gauges: usize,
}

impl AveragedGauge {
    /// Averaged rainfall on the common grid.
    pub fn series(&self) -> &PointSeries {
        &self.series
    }

    /// Mean position of the contributing gauges.
    pub fn location(&self) -> Coord {
        self.location
    }

    /// Grid spacing in seconds.
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Number of gauges that were averaged.
    pub fn n_gauges(&self) -> usize {
        self.n_gauges
    }

    /// Consumes self and returns the averaged series.
    pub fn into_series(self) -> PointSeries {
        self.series
    }
}

/// Uniform grid `t_min + k * step` for every point below `t_max + step`.
///
/// When the span is not a multiple of `step` the last point lies past
/// `t_max`.
pub(crate) fn common_grid(t_min: i64, t_max: i64, step: i64) -> Vec<i64> {
    let span = t_max - t_min;
    let n = span / step + 1 + i64::from(span % step != 0);
    (0..n).map(|k| t_min + k * step).collect()
}

/// Merge `gauges` into one averaged reference series.
///
/// Accepts owned sensors or references, so the result of
/// [`GaugeNetwork::find_near`](crate::GaugeNetwork::find_near) can be passed
/// without cloning.
///
/// The grid covers the union of the gauges' time ranges. Each gauge is
/// linearly interpolated onto the grid inside its own range only; grid points
/// outside it get no contribution from that gauge. The output at each grid
/// point is the mean over the gauges that contribute there, and NaN where
/// none does. Gauges whose values are all missing contribute nothing, not
/// even to the grid range, and are not counted in
/// [`AveragedGauge::n_gauges`].
///
/// Sums run in gauge order, so results are bit-identical for a fixed input
/// order but may differ in the last ulp if the order changes.
///
/// # Errors
///
/// Returns [`GaugeError::NoGauges`] when no gauge carries a valid value and
/// [`GaugeError::InvalidStep`] if `step <= 0`.
#[tracing::instrument(skip(gauges), fields(n_gauges = gauges.len()))]
pub fn average_gauges<G: Borrow<GaugeSensor>>(
    gauges: &[G],
    step: i64,
) -> Result<AveragedGauge, GaugeError> {
    if step <= 0 {
        return Err(GaugeError::InvalidStep { step });
    }

    let usable: Vec<&GaugeSensor> = gauges
        .iter()
        .map(<G as Borrow<GaugeSensor>>::borrow)
        .filter(|g| {
            let missing = g.series().is_all_missing();
            if missing {
                debug!(gauge = g.id(), "gauge has no valid values; contributes nothing");
            }
            !missing
        })
        .collect();

    let t_min = usable.iter().filter_map(|g| g.series().start()).min();
    let t_max = usable.iter().filter_map(|g| g.series().end()).max();
    let (Some(t_min), Some(t_max)) = (t_min, t_max) else {
        return Err(GaugeError::NoGauges);
    };

    let grid = common_grid(t_min, t_max, step);

    let rows: Vec<Vec<f64>> = usable
        .iter()
        .map(|g| linear_bounded(g.series(), &grid))
        .collect();
    let averaged = linkrain_stats::nan_mean_columns(&rows);

    let locations: Vec<Coord> = usable.iter().map(|g| g.location()).collect();
    let location = Coord::mean(&locations).ok_or(GaugeError::NoGauges)?;

    debug!(n_points = grid.len(), t_min, t_max, "averaged gauge grid built");

    Ok(AveragedGauge {
        series: PointSeries::new(grid, averaged)?,
        location,
        step,
        n_gauges: usable.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_exact_multiple() {
        assert_eq!(common_grid(0, 600, 300), vec![0, 300, 600]);
    }

    #[test]
    fn grid_overshoots_ragged_span() {
        assert_eq!(common_grid(0, 250, 300), vec![0, 300]);
    }

    #[test]
    fn grid_single_instant() {
        assert_eq!(common_grid(42, 42, 300), vec![42]);
    }

    #[test]
    fn invalid_step_rejected() {
        assert_eq!(
            average_gauges::<GaugeSensor>(&[], 0),
            Err(GaugeError::InvalidStep { step: 0 })
        );
    }

    #[test]
    fn empty_set_is_no_gauges() {
        assert_eq!(average_gauges::<GaugeSensor>(&[], 300), Err(GaugeError::NoGauges));
    }
}
