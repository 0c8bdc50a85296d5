//! Bucketing of boolean predictions and the inner join with gauge values.

use std::collections::HashMap;

/// Start of the epoch-aligned bucket holding `t`.
pub(crate) fn bucket_start(t: i64, bucket_seconds: i64) -> i64 {
    t.div_euclid(bucket_seconds) * bucket_seconds
}

/// Collapse `values` into epoch-aligned buckets of `bucket_seconds`.
///
/// A bucket is wet when any sample inside it is wet. Buckets run
/// contiguously from the first to the last occupied one; empty buckets in
/// between are dry. Returns `(bucket_starts, wet)`, both empty for empty
/// input.
///
/// # Panics
///
/// Panics if `times` and `values` differ in length or `bucket_seconds <= 0`.
pub fn or_resample(times: &[i64], values: &[bool], bucket_seconds: i64) -> (Vec<i64>, Vec<bool>) {
    assert_eq!(times.len(), values.len(), "or_resample: length mismatch");
    assert!(bucket_seconds > 0, "or_resample: bucket_seconds must be > 0");

    let first = times.iter().map(|&t| bucket_start(t, bucket_seconds)).min();
    let last = times.iter().map(|&t| bucket_start(t, bucket_seconds)).max();
    let (Some(first), Some(last)) = (first, last) else {
        return (Vec::new(), Vec::new());
    };

    let n = ((last - first) / bucket_seconds + 1) as usize;
    let starts: Vec<i64> = (0..n as i64).map(|k| first + k * bucket_seconds).collect();
    let mut wet = vec![false; n];
    for (&t, &v) in times.iter().zip(values) {
        if v {
            let k = ((bucket_start(t, bucket_seconds) - first) / bucket_seconds) as usize;
            wet[k] = true;
        }
    }
    (starts, wet)
}

/// One row of the prediction/observation join.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinedRow {
    pub time: i64,
    pub predicted: bool,
    pub observed: f64,
}

/// Pair predictions with observations on exactly equal timestamps.
///
/// Rows follow the order of `obs_times`. Observations that are NaN or have
/// no prediction at the same instant are dropped.
pub fn inner_join(
    pred_times: &[i64],
    predicted: &[bool],
    obs_times: &[i64],
    observed: &[f64],
) -> Vec<JoinedRow> {
    let lookup: HashMap<i64, bool> = pred_times
        .iter()
        .copied()
        .zip(predicted.iter().copied())
        .collect();

    obs_times
        .iter()
        .zip(observed)
        .filter(|(_, v)| !v.is_nan())
        .filter_map(|(&time, &observed)| {
            lookup.get(&time).map(|&predicted| JoinedRow {
                time,
                predicted,
                observed,
            })
        })
        .collect()
}
