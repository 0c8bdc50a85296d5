//! Attenuation-based wet/dry detectors.

use crate::error::WetDryError;

/// Per-sample output of a wet/dry detector.
///
/// `classification` holds 1.0 (wet) or 0.0 (dry); `confidence` holds the
/// statistic the decision was based on. Both share the input's time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorOutput {
    classification: Vec<f64>,
    confidence: Vec<f64>,
}

impl DetectorOutput {
    /// Pairs a classification stream with its confidence stream.
    ///
    /// # Errors
    ///
    /// Returns [`WetDryError::MisalignedLength`] if the streams differ in
    /// length.
    pub fn new(classification: Vec<f64>, confidence: Vec<f64>) -> Result<Self, WetDryError> {
        if confidence.len() != classification.len() {
            return Err(WetDryError::MisalignedLength {
                name: "confidence",
                expected: classification.len(),
                got: confidence.len(),
            });
        }
        Ok(Self {
            classification,
            confidence,
        })
    }

    pub fn classification(&self) -> &[f64] {
        &self.classification
    }

    pub fn confidence(&self) -> &[f64] {
        &self.confidence
    }

    pub fn len(&self) -> usize {
        self.classification.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classification.is_empty()
    }
}

/// A detector maps one link's attenuation series to a wet/dry decision per
/// sample.
pub trait WetDryDetector {
    fn detect(&self, attenuation: &[f64]) -> DetectorOutput;
}

impl<F> WetDryDetector for F
where
    F: Fn(&[f64]) -> DetectorOutput,
{
    fn detect(&self, attenuation: &[f64]) -> DetectorOutput {
        self(attenuation)
    }
}

/// Rolling standard-deviation detector.
///
/// Rain adds fast fluctuation to a link's attenuation; dry periods are
/// flat apart from slow drift. The confidence at sample `i` is the population
/// standard deviation of the non-missing attenuation values in the trailing
/// window `[i - window + 1, i]` (shorter at the start of the series, NaN with
/// fewer than two values). A sample is wet when that deviation exceeds
/// `threshold` (dB).
#[derive(Debug, Clone, PartialEq)]
pub struct RollingStdDetector {
    threshold: f64,
    window: usize,
}

impl RollingStdDetector {
    /// Creates a detector after validating its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`WetDryError::InvalidConfig`] if `window < 2` or `threshold`
    /// is negative or non-finite.
    pub fn new(threshold: f64, window: usize) -> Result<Self, WetDryError> {
        if window < 2 {
            return Err(WetDryError::InvalidConfig {
                reason: format!("window must be >= 2, got {window}"),
            });
        }
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(WetDryError::InvalidConfig {
                reason: format!("threshold must be finite and >= 0, got {threshold}"),
            });
        }
        Ok(Self { threshold, window })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl WetDryDetector for RollingStdDetector {
    fn detect(&self, attenuation: &[f64]) -> DetectorOutput {
        let confidence: Vec<f64> = (0..attenuation.len())
            .map(|i| {
                let lo = (i + 1).saturating_sub(self.window);
                linkrain_stats::nan_population_sd(&attenuation[lo..=i])
            })
            .collect();
        // NaN never exceeds the threshold, so undetermined samples are dry.
        let classification = confidence
            .iter()
            .map(|&s| if s > self.threshold { 1.0 } else { 0.0 })
            .collect();

        DetectorOutput {
            classification,
            confidence,
        }
    }
}
