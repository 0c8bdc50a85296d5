//! Fixed-count pre-binning of gauge series.

use linkrain_series::PointSeries;

use crate::error::GaugeError;

/// Average consecutive groups of `bin_size` samples.
///
/// Each group is stamped with its first timestamp; the last group may be
/// shorter. The mean is plain (not NaN-aware), so one missing sample makes
/// the whole group missing. With 5-minute gauges and `bin_size = 3` this
/// yields 15-minute averages.
///
/// # Errors
///
/// Returns [`GaugeError::InvalidBinSize`] if `bin_size` is zero.
pub fn bin_mean(series: &PointSeries, bin_size: usize) -> Result<PointSeries, GaugeError> {
    if bin_size == 0 {
        return Err(GaugeError::InvalidBinSize { bin_size });
    }

    let times: Vec<i64> = series
        .timestamps()
        .chunks(bin_size)
        .map(|c| c[0])
        .collect();
    let values: Vec<f64> = series
        .values()
        .chunks(bin_size)
        .map(linkrain_stats::mean)
        .collect();

    Ok(PointSeries::new(times, values)?)
}
