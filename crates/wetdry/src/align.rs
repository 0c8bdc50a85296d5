//! Alignment of detector output with a gauge reference.

use linkrain_series::{PointSeries, TimeWindow, apply_mask, validate_strictly_increasing};
use tracing::debug;

use crate::config::AlignConfig;
use crate::detector::DetectorOutput;
use crate::error::WetDryError;
use crate::nearest::nearest_resample;

/// Detector output and gauge reference restricted to their common window.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedDetection {
    window: TimeWindow,
    link_times: Vec<i64>,
    classification: Vec<bool>,
    confidence: Vec<f64>,
    reference: PointSeries,
    at_reference: Vec<bool>,
}

impl AlignedDetection {
    /// Common time window of link and reference.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Link timestamps inside the window.
    pub fn link_times(&self) -> &[i64] {
        &self.link_times
    }

    /// Wet (`true`) / dry decision per link timestamp inside the window.
    pub fn classification(&self) -> &[bool] {
        &self.classification
    }

    /// Detector confidence per link timestamp inside the window.
    pub fn confidence(&self) -> &[f64] {
        &self.confidence
    }

    /// Gauge reference samples inside the window.
    pub fn reference(&self) -> &PointSeries {
        &self.reference
    }

    /// Nearest-neighbour classification at each reference timestamp.
    pub fn at_reference(&self) -> &[bool] {
        &self.at_reference
    }
}

/// Convert a 0/1 stream to booleans, rejecting anything else.
pub(crate) fn to_bool(values: &[f64]) -> Result<Vec<bool>, WetDryError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if value == 1.0 {
                Ok(true)
            } else if value == 0.0 {
                Ok(false)
            } else {
                Err(WetDryError::InvalidInput { index, value })
            }
        })
        .collect()
}

/// Align a link's detector output with its gauge reference.
///
/// The last [`AlignConfig::trailing_trim`] samples are dropped from the link
/// time axis and from both detector streams. Link and reference samples are
/// then masked to the intersection of their time ranges; the masked
/// classification is resampled onto the masked reference timestamps by
/// nearest neighbour.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`WetDryError::NoReference`] | `reference` is `None` |
/// | [`WetDryError::EmptyInput`] | no link samples, empty reference, or trim removes everything |
/// | [`WetDryError::MisalignedLength`] | detector streams don't match `link_times` |
/// | [`WetDryError::InvalidInput`] | a classification value is not 0 or 1 |
/// | [`WetDryError::Series`] | `link_times` not strictly increasing |
/// | [`WetDryError::NoOverlap`] | empty window, or no samples of one side inside it |
#[tracing::instrument(skip_all, fields(n_link = link_times.len()))]
pub fn align_detection(
    link_times: &[i64],
    output: &DetectorOutput,
    reference: Option<&PointSeries>,
    config: &AlignConfig,
) -> Result<AlignedDetection, WetDryError> {
    let reference = reference.ok_or(WetDryError::NoReference)?;

    if link_times.is_empty() {
        return Err(WetDryError::EmptyInput { name: "link time" });
    }
    if reference.is_empty() {
        return Err(WetDryError::EmptyInput { name: "reference" });
    }
    for (name, len) in [
        ("classification", output.classification().len()),
        ("confidence", output.confidence().len()),
    ] {
        if len != link_times.len() {
            return Err(WetDryError::MisalignedLength {
                name,
                expected: link_times.len(),
                got: len,
            });
        }
    }
    validate_strictly_increasing(link_times).finish()?;

    let n_keep = link_times.len().saturating_sub(config.trailing_trim());
    if n_keep == 0 {
        return Err(WetDryError::EmptyInput {
            name: "trimmed link time",
        });
    }
    let times = &link_times[..n_keep];
    let classification = to_bool(&output.classification()[..n_keep])?;
    let confidence = &output.confidence()[..n_keep];

    let link_window = TimeWindow::spanning(times).ok_or(WetDryError::NoOverlap)?;
    let ref_window = reference.window().ok_or(WetDryError::NoOverlap)?;
    let window = TimeWindow::intersect(link_window, ref_window).ok_or(WetDryError::NoOverlap)?;

    let link_mask = window.mask(times);
    let link_times = apply_mask(times, &link_mask);
    let classification = apply_mask(&classification, &link_mask);
    let confidence = apply_mask(confidence, &link_mask);
    let reference = reference.slice_window(&window);

    if link_times.is_empty() || reference.is_empty() {
        debug!(
            start = window.start(),
            end = window.end(),
            n_link = link_times.len(),
            n_reference = reference.len(),
            "window holds no samples of one side"
        );
        return Err(WetDryError::NoOverlap);
    }

    let at_reference = nearest_resample(&link_times, &classification, reference.timestamps());

    debug!(
        start = window.start(),
        end = window.end(),
        n_link = link_times.len(),
        n_reference = reference.len(),
        "aligned detection"
    );

    Ok(AlignedDetection {
        window,
        link_times,
        classification,
        confidence,
        reference,
        at_reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bool_accepts_binary() {
        assert_eq!(to_bool(&[0.0, 1.0]).unwrap(), vec![false, true]);
    }

    #[test]
    fn to_bool_rejects_fraction() {
        assert_eq!(
            to_bool(&[0.0, 0.5]),
            Err(WetDryError::InvalidInput {
                index: 1,
                value: 0.5
            })
        );
    }

    #[test]
    fn to_bool_rejects_nan() {
        assert!(matches!(
            to_bool(&[f64::NAN]),
            Err(WetDryError::InvalidInput { index: 0, .. })
        ));
    }
}
