use std::path::PathBuf;

use serde::Deserialize;

/// Top-level linkrain configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LinkrainConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Gauge search and aggregation settings.
    #[serde(default)]
    pub gauge: GaugeToml,

    /// Rolling standard-deviation detector settings.
    #[serde(default)]
    pub detector: DetectorToml,

    /// Scoring settings.
    #[serde(default)]
    pub score: ScoreToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaugeToml {
    #[serde(default = "default_max_distance_m")]
    pub max_distance_m: f64,
    #[serde(default = "default_step_seconds")]
    pub default_step_seconds: i64,
}

impl Default for GaugeToml {
    fn default() -> Self {
        Self {
            max_distance_m: default_max_distance_m(),
            default_step_seconds: default_step_seconds(),
        }
    }
}

fn default_max_distance_m() -> f64 {
    5000.0
}
fn default_step_seconds() -> i64 {
    300
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorToml {
    #[serde(default = "default_detector_threshold")]
    pub threshold: f64,
    #[serde(default = "default_detector_window")]
    pub window: usize,
    #[serde(default = "default_trailing_trim")]
    pub trailing_trim: usize,
}

impl Default for DetectorToml {
    fn default() -> Self {
        Self {
            threshold: default_detector_threshold(),
            window: default_detector_window(),
            trailing_trim: default_trailing_trim(),
        }
    }
}

fn default_detector_threshold() -> f64 {
    0.5
}
fn default_detector_window() -> usize {
    10
}
fn default_trailing_trim() -> usize {
    linkrain_wetdry::DEFAULT_TRAILING_TRIM
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreToml {
    #[serde(default)]
    pub rain_threshold: f64,
    #[serde(default = "default_bucket_seconds")]
    pub bucket_seconds: i64,
    #[serde(default)]
    pub gauge_bin_size: Option<usize>,
}

impl Default for ScoreToml {
    fn default() -> Self {
        Self {
            rain_threshold: 0.0,
            bucket_seconds: default_bucket_seconds(),
            gauge_bin_size: None,
        }
    }
}

fn default_bucket_seconds() -> i64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: LinkrainConfig = toml::from_str("").unwrap();
        assert!(config.io.input.is_none());
        assert_eq!(config.gauge.max_distance_m, 5000.0);
        assert_eq!(config.gauge.default_step_seconds, 300);
        assert_eq!(config.detector.window, 10);
        assert_eq!(config.detector.trailing_trim, 2);
        assert_eq!(config.score.rain_threshold, 0.0);
        assert_eq!(config.score.bucket_seconds, 300);
        assert_eq!(config.score.gauge_bin_size, None);
    }

    #[test]
    fn sections_override_defaults() {
        let config: LinkrainConfig = toml::from_str(
            r#"
            [io]
            input = "batch.json"

            [gauge]
            max_distance_m = 2500.0

            [detector]
            threshold = 1.2
            trailing_trim = 0

            [score]
            bucket_seconds = 900
            gauge_bin_size = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.io.input, Some(PathBuf::from("batch.json")));
        assert_eq!(config.gauge.max_distance_m, 2500.0);
        assert_eq!(config.gauge.default_step_seconds, 300);
        assert_eq!(config.detector.threshold, 1.2);
        assert_eq!(config.detector.trailing_trim, 0);
        assert_eq!(config.score.bucket_seconds, 900);
        assert_eq!(config.score.gauge_bin_size, Some(3));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<LinkrainConfig>("[score]\nbucket = 900\n").is_err());
        assert!(toml::from_str::<LinkrainConfig>("[warm]\nn_sim = 1\n").is_err());
    }
}
