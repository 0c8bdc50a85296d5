//! NaN-aware numeric helpers for the linkrain pipeline.
//!
//! Missing samples are represented as `f64::NAN` everywhere in the workspace.
//! The `nan_*` functions skip them; the plain functions propagate them.

use std::collections::BTreeMap;

/// Mean Earth radius (IUGG) in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Arithmetic mean of a slice. Returns NaN if empty.
///
/// NaN inputs propagate.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Mean of the non-NaN values. Returns NaN if no value is present.
pub fn nan_mean(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for &x in data.iter().filter(|x| !x.is_nan()) {
        sum += x;
        n += 1;
    }
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Element-wise [`nan_mean`] across equally long rows.
///
/// Column `j` of the result is the mean of `rows[i][j]` over every row where
/// that value is present. Rows are summed in order, so the result is
/// deterministic for a fixed row order.
///
/// # Panics
///
/// Panics if the rows differ in length.
pub fn nan_mean_columns(rows: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let n_cols = first.len();
    let mut sums = vec![0.0; n_cols];
    let mut counts = vec![0usize; n_cols];

    for row in rows {
        assert_eq!(
            row.len(),
            n_cols,
            "nan_mean_columns: rows must have equal length"
        );
        for (j, &x) in row.iter().enumerate() {
            if !x.is_nan() {
                sums[j] += x;
                counts[j] += 1;
            }
        }
    }

    sums.into_iter()
        .zip(counts)
        .map(|(s, c)| if c == 0 { f64::NAN } else { s / c as f64 })
        .collect()
}

/// Population standard deviation (N denominator) of the non-NaN values.
///
/// Returns NaN when fewer than two values are present.
pub fn nan_population_sd(data: &[f64]) -> f64 {
    let finite: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
    if finite.len() < 2 {
        return f64::NAN;
    }
    let n = finite.len() as f64;
    let m = finite.iter().sum::<f64>() / n;
    (finite.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / n).sqrt()
}

/// Most frequent positive difference between consecutive timestamps.
///
/// Ties go to the smaller step. Returns `None` for fewer than two samples or
/// when no consecutive difference is positive.
pub fn dominant_step(timestamps: &[i64]) -> Option<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for w in timestamps.windows(2) {
        let d = w[1] - w[0];
        if d > 0 {
            *counts.entry(d).or_insert(0) += 1;
        }
    }
    // On equal counts the smaller step compares greater.
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(step, _)| step)
}

/// Great-circle distance in metres between two (lon, lat) points in degrees.
pub fn haversine_m(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}
