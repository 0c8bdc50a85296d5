//! Nearest-neighbour resampling for categorical streams.

/// Value of the closest source sample at each target timestamp.
///
/// Suited to categorical data: every output is one of the source values,
/// never a blend. A target exactly halfway between two samples takes the
/// earlier one. Targets before the first or after the last sample take the
/// end value. Returns an empty vector if the source is empty.
///
/// # Panics
///
/// Panics if `source_times` and `source_values` differ in length.
pub fn nearest_resample<T: Copy>(
    source_times: &[i64],
    source_values: &[T],
    targets: &[i64],
) -> Vec<T> {
    assert_eq!(
        source_times.len(),
        source_values.len(),
        "nearest_resample: length mismatch"
    );
    if source_times.is_empty() {
        return Vec::new();
    }
    let last = source_times.len() - 1;

    targets
        .iter()
        .map(|&t| match source_times.binary_search(&t) {
            Ok(i) => source_values[i],
            Err(0) => source_values[0],
            Err(i) if i > last => source_values[last],
            Err(i) => {
                if t - source_times[i - 1] <= source_times[i] - t {
                    source_values[i - 1]
                } else {
                    source_values[i]
                }
            }
        })
        .collect()
}
