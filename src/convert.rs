//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use linkrain_evaluate::{PipelineConfig, ScoreConfig};
use linkrain_wetdry::{AlignConfig, RollingStdDetector};

use crate::config::*;

/// Builds a [`RollingStdDetector`] from the TOML detector configuration.
pub fn build_detector(detector: &DetectorToml) -> Result<RollingStdDetector> {
    RollingStdDetector::new(detector.threshold, detector.window)
        .context("invalid [detector] settings")
}

/// Builds a [`ScoreConfig`] from the TOML score configuration.
pub fn build_score_config(score: &ScoreToml) -> ScoreConfig {
    ScoreConfig::default()
        .with_rain_threshold(score.rain_threshold)
        .with_bucket_seconds(score.bucket_seconds)
        .with_gauge_bin_size(score.gauge_bin_size)
}

/// Builds a validated [`PipelineConfig`] from the full configuration.
pub fn build_pipeline_config(config: &LinkrainConfig) -> Result<PipelineConfig> {
    let pipeline = PipelineConfig::default()
        .with_max_distance_m(config.gauge.max_distance_m)
        .with_default_step(config.gauge.default_step_seconds)
        .with_align(AlignConfig::default().with_trailing_trim(config.detector.trailing_trim))
        .with_score(build_score_config(&config.score));
    pipeline.validate().context("invalid pipeline settings")?;
    Ok(pipeline)
}
