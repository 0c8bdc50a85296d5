//! Bounded linear interpolation onto a target grid.

use linkrain_series::PointSeries;

/// Linearly interpolate `source` at each of `targets`.
///
/// Targets outside `[source.start(), source.end()]` are NaN (no
/// extrapolation). A target equal to a source timestamp takes that sample's
/// value. A target between two samples is NaN if either neighbour is NaN.
pub(crate) fn linear_bounded(source: &PointSeries, targets: &[i64]) -> Vec<f64> {
    let ts = source.timestamps();
    let vs = source.values();
    let (Some(&lo_t), Some(&hi_t)) = (ts.first(), ts.last()) else {
        return vec![f64::NAN; targets.len()];
    };

    targets
        .iter()
        .map(|&t| {
            if t < lo_t || t > hi_t {
                return f64::NAN;
            }
            match ts.binary_search(&t) {
                Ok(i) => vs[i],
                // lo_t < t < hi_t here, so 0 < i < ts.len().
                Err(i) => {
                    let (t0, t1) = (ts[i - 1], ts[i]);
                    let (v0, v1) = (vs[i - 1], vs[i]);
                    if v0.is_nan() || v1.is_nan() {
                        return f64::NAN;
                    }
                    let frac = (t - t0) as f64 / (t1 - t0) as f64;
                    v0 + (v1 - v0) * frac
                }
            }
        })
        .collect()
}
