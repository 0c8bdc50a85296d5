//! Scoring and pipeline configuration.

use linkrain_gauge::DEFAULT_STEP_SECONDS;
use linkrain_wetdry::AlignConfig;

use crate::error::EvaluateError;

/// Configuration for confusion-matrix scoring.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    rain_threshold: f64,
    bucket_seconds: i64,
    gauge_bin_size: Option<usize>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            rain_threshold: 0.0,
            bucket_seconds: 300,
            gauge_bin_size: None,
        }
    }
}

impl ScoreConfig {
    /// Set the rainfall value above which a gauge sample counts as wet.
    pub fn with_rain_threshold(mut self, threshold: f64) -> Self {
        self.rain_threshold = threshold;
        self
    }

    /// Set the bucket width (seconds) predictions are OR-resampled to.
    pub fn with_bucket_seconds(mut self, seconds: i64) -> Self {
        self.bucket_seconds = seconds;
        self
    }

    /// Set the number of consecutive reference samples averaged before
    /// scoring (`Some(3)` turns 5-minute gauges into 15-minute means).
    pub fn with_gauge_bin_size(mut self, bin_size: Option<usize>) -> Self {
        self.gauge_bin_size = bin_size;
        self
    }

    /// Returns the rain threshold.
    pub fn rain_threshold(&self) -> f64 {
        self.rain_threshold
    }

    /// Returns the bucket width in seconds.
    pub fn bucket_seconds(&self) -> i64 {
        self.bucket_seconds
    }

    /// Returns the reference pre-binning size.
    pub fn gauge_bin_size(&self) -> Option<usize> {
        self.gauge_bin_size
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), EvaluateError> {
        if !self.rain_threshold.is_finite() {
            return Err(EvaluateError::InvalidConfig {
                reason: format!("rain_threshold must be finite, got {}", self.rain_threshold),
            });
        }
        if self.bucket_seconds <= 0 {
            return Err(EvaluateError::InvalidConfig {
                reason: format!("bucket_seconds must be > 0, got {}", self.bucket_seconds),
            });
        }
        if self.gauge_bin_size == Some(0) {
            return Err(EvaluateError::InvalidConfig {
                reason: "gauge_bin_size must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration for the per-link pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    max_distance_m: f64,
    default_step: i64,
    align: AlignConfig,
    score: ScoreConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_distance_m: 5000.0,
            default_step: DEFAULT_STEP_SECONDS,
            align: AlignConfig::default(),
            score: ScoreConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the gauge search radius around the link center, in metres.
    pub fn with_max_distance_m(mut self, metres: f64) -> Self {
        self.max_distance_m = metres;
        self
    }

    /// Set the grid step used when the link's sampling interval is unknown.
    pub fn with_default_step(mut self, seconds: i64) -> Self {
        self.default_step = seconds;
        self
    }

    /// Set the alignment configuration.
    pub fn with_align(mut self, align: AlignConfig) -> Self {
        self.align = align;
        self
    }

    /// Set the scoring configuration.
    pub fn with_score(mut self, score: ScoreConfig) -> Self {
        self.score = score;
        self
    }

    /// Returns the gauge search radius in metres.
    pub fn max_distance_m(&self) -> f64 {
        self.max_distance_m
    }

    /// Returns the fallback grid step.
    pub fn default_step(&self) -> i64 {
        self.default_step
    }

    /// Returns the alignment configuration.
    pub fn align(&self) -> &AlignConfig {
        &self.align
    }

    /// Returns the scoring configuration.
    pub fn score(&self) -> &ScoreConfig {
        &self.score
    }

    /// Validates this configuration and the nested scoring configuration.
    pub fn validate(&self) -> Result<(), EvaluateError> {
        if !self.max_distance_m.is_finite() || self.max_distance_m < 0.0 {
            return Err(EvaluateError::InvalidConfig {
                reason: format!(
                    "max_distance_m must be finite and >= 0, got {}",
                    self.max_distance_m
                ),
            });
        }
        if self.default_step <= 0 {
            return Err(EvaluateError::InvalidConfig {
                reason: format!("default_step must be > 0, got {}", self.default_step),
            });
        }
        self.score.validate()
    }
}
