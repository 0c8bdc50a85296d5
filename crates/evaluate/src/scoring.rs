//! Confusion-matrix scoring of wet/dry predictions against gauge rainfall.

use linkrain_series::validate_strictly_increasing;
use linkrain_wetdry::AlignedDetection;
use serde::Serialize;

use crate::config::ScoreConfig;
use crate::error::EvaluateError;
use crate::timeseries::{inner_join, or_resample};

/// Confusion category of one joined time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TrueNegative,
    TruePositive,
    FalsePositive,
    FalseNegative,
}

impl Category {
    /// Classify one (prediction, observation) pair.
    pub fn classify(predicted_wet: bool, observed_wet: bool) -> Self {
        match (predicted_wet, observed_wet) {
            (true, true) => Category::TruePositive,
            (true, false) => Category::FalsePositive,
            (false, true) => Category::FalseNegative,
            (false, false) => Category::TrueNegative,
        }
    }

    /// Integer code: TN=0, TP=1, FP=2, FN=3.
    pub fn code(self) -> u8 {
        match self {
            Category::TrueNegative => 0,
            Category::TruePositive => 1,
            Category::FalsePositive => 2,
            Category::FalseNegative => 3,
        }
    }
}

/// One scored time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfusionRecord {
    pub time: i64,
    pub predicted_wet: bool,
    pub observed_value: f64,
    pub observed_wet: bool,
    pub category: Category,
}

/// Confusion-matrix tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl ConfusionCounts {
    /// Tally the categories of `records`.
    pub fn from_records(records: &[ConfusionRecord]) -> Self {
        let mut counts = Self::default();
        for r in records {
            counts.add(r.category);
        }
        counts
    }

    fn add(&mut self, category: Category) {
        match category {
            Category::TruePositive => self.true_positives += 1,
            Category::TrueNegative => self.true_negatives += 1,
            Category::FalsePositive => self.false_positives += 1,
            Category::FalseNegative => self.false_negatives += 1,
        }
    }

    /// Sum two tallies.
    pub fn merged(self, other: Self) -> Self {
        Self {
            true_positives: self.true_positives + other.true_positives,
            true_negatives: self.true_negatives + other.true_negatives,
            false_positives: self.false_positives + other.false_positives,
            false_negatives: self.false_negatives + other.false_negatives,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// `(TP + TN) / total`, 0 when nothing was scored.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// `TP / (TP + FP)`.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `TP / (TP + FN)`, also reported as `positive_acc`.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// `TN / (TN + FP)`.
    pub fn negative_accuracy(&self) -> f64 {
        ratio(self.true_negatives, self.true_negatives + self.false_positives)
    }
}

/// Scalar metrics plus the per-step confusion series for one link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionScore {
    pub accuracy: f64,
    pub positive_acc: f64,
    pub negative_acc: f64,
    pub precision: f64,
    pub recall: f64,
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Category codes, parallel to `time_array`.
    pub categories: Vec<u8>,
    pub time_array: Vec<i64>,
    pub records: Vec<ConfusionRecord>,
}

impl DetectionScore {
    fn from_records(records: Vec<ConfusionRecord>) -> Self {
        let counts = ConfusionCounts::from_records(&records);
        Self {
            accuracy: counts.accuracy(),
            positive_acc: counts.recall(),
            negative_acc: counts.negative_accuracy(),
            precision: counts.precision(),
            recall: counts.recall(),
            true_positives: counts.true_positives,
            true_negatives: counts.true_negatives,
            false_positives: counts.false_positives,
            false_negatives: counts.false_negatives,
            categories: records.iter().map(|r| r.category.code()).collect(),
            time_array: records.iter().map(|r| r.time).collect(),
            records,
        }
    }

    /// The tallies behind the metrics.
    pub fn counts(&self) -> ConfusionCounts {
        ConfusionCounts {
            true_positives: self.true_positives,
            true_negatives: self.true_negatives,
            false_positives: self.false_positives,
            false_negatives: self.false_negatives,
        }
    }

    /// Number of joined time steps.
    pub fn total(&self) -> usize {
        self.records.len()
    }
}

fn score_bools(
    pred_times: &[i64],
    predicted: &[bool],
    obs_times: &[i64],
    observed: &[f64],
    config: &ScoreConfig,
) -> DetectionScore {
    let (bucket_times, bucket_wet) = or_resample(pred_times, predicted, config.bucket_seconds());
    let threshold = config.rain_threshold();

    let records = inner_join(&bucket_times, &bucket_wet, obs_times, observed)
        .into_iter()
        .map(|row| {
            let observed_wet = row.observed > threshold;
            ConfusionRecord {
                time: row.time,
                predicted_wet: row.predicted,
                observed_value: row.observed,
                observed_wet,
                category: Category::classify(row.predicted, observed_wet),
            }
        })
        .collect();

    DetectionScore::from_records(records)
}

/// Score 0/1 predictions against observed rainfall.
///
/// Predictions are OR-collapsed into `bucket_seconds` buckets, then joined
/// to the observations on exact timestamps. NaN observations are dropped.
/// An observation counts as wet when it exceeds the rain threshold.
///
/// # Errors
///
/// Returns [`EvaluateError::InvalidConfig`] for an invalid `config`,
/// [`EvaluateError::MisalignedLength`] when a stream's values and timestamps
/// differ in length, [`EvaluateError::EmptyInput`] for an empty stream,
/// [`EvaluateError::Validation`] when `obs_times` is not strictly increasing,
/// and [`EvaluateError::InvalidInput`] for a predicted value other than 0 or 1.
pub fn score_detection(
    pred_times: &[i64],
    predicted: &[f64],
    obs_times: &[i64],
    observed: &[f64],
    config: &ScoreConfig,
) -> Result<DetectionScore, EvaluateError> {
    config.validate()?;
    if predicted.len() != pred_times.len() {
        return Err(EvaluateError::MisalignedLength {
            name: "predicted",
            expected: pred_times.len(),
            got: predicted.len(),
        });
    }
    if observed.len() != obs_times.len() {
        return Err(EvaluateError::MisalignedLength {
            name: "observed",
            expected: obs_times.len(),
            got: observed.len(),
        });
    }
    if predicted.is_empty() {
        return Err(EvaluateError::EmptyInput { name: "predicted" });
    }
    if observed.is_empty() {
        return Err(EvaluateError::EmptyInput { name: "observed" });
    }
    validate_strictly_increasing(obs_times).finish()?;

    let flags = predicted
        .iter()
        .enumerate()
        .map(|(index, &value)| match value {
            v if v == 1.0 => Ok(true),
            v if v == 0.0 => Ok(false),
            _ => Err(EvaluateError::InvalidInput { index, value }),
        })
        .collect::<Result<Vec<bool>, _>>()?;

    Ok(score_bools(pred_times, &flags, obs_times, observed, config))
}

/// Score the output of [`linkrain_wetdry::align_detection`].
///
/// # Errors
///
/// Returns [`EvaluateError::InvalidConfig`] for an invalid `config`.
pub fn score_aligned(
    aligned: &AlignedDetection,
    config: &ScoreConfig,
) -> Result<DetectionScore, EvaluateError> {
    config.validate()?;
    Ok(score_alignment(aligned, config))
}

/// [`score_aligned`] for an already validated `config`.
pub(crate) fn score_alignment(aligned: &AlignedDetection, config: &ScoreConfig) -> DetectionScore {
    let reference = aligned.reference();
    score_bools(
        aligned.link_times(),
        aligned.classification(),
        reference.timestamps(),
        reference.values(),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn category_codes() {
        assert_eq!(Category::classify(false, false).code(), 0);
        assert_eq!(Category::classify(true, true).code(), 1);
        assert_eq!(Category::classify(true, false).code(), 2);
        assert_eq!(Category::classify(false, true).code(), 3);
    }

    #[test]
    fn one_of_each_category() {
        let t = [0, 300, 600, 900];
        let score = score_detection(
            &t,
            &[1.0, 1.0, 0.0, 0.0],
            &t,
            &[2.0, 0.0, 0.0, 3.0],
            &ScoreConfig::default(),
        )
        .unwrap();
        assert_eq!(score.true_positives, 1);
        assert_eq!(score.false_positives, 1);
        assert_eq!(score.true_negatives, 1);
        assert_eq!(score.false_negatives, 1);
        assert_relative_eq!(score.accuracy, 0.5, epsilon = 1e-12);
        assert_relative_eq!(score.precision, 0.5, epsilon = 1e-12);
        assert_relative_eq!(score.recall, 0.5, epsilon = 1e-12);
        assert_relative_eq!(score.negative_acc, 0.5, epsilon = 1e-12);
        assert_eq!(score.categories, vec![1, 2, 0, 3]);
        assert_eq!(score.time_array, t.to_vec());
    }

    #[test]
    fn zero_denominators_give_zero() {
        let t = [0, 300];
        let score = score_detection(&t, &[0.0, 0.0], &t, &[0.0, 0.0], &ScoreConfig::default())
            .unwrap();
        assert_eq!(score.true_negatives, 2);
        assert_eq!(score.precision, 0.0);
        assert_eq!(score.recall, 0.0);
        assert_eq!(score.positive_acc, 0.0);
        assert_relative_eq!(score.accuracy, 1.0, epsilon = 1e-12);
        assert_relative_eq!(score.negative_acc, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn perfect_mixed_prediction_scores_one() {
        let t = [0, 300, 600, 900];
        let score = score_detection(
            &t,
            &[1.0, 0.0, 1.0, 0.0],
            &t,
            &[2.0, 0.0, 0.5, 0.0],
            &ScoreConfig::default(),
        )
        .unwrap();
        assert_eq!(score.true_positives, 2);
        assert_eq!(score.true_negatives, 2);
        assert_relative_eq!(score.accuracy, 1.0, epsilon = 1e-12);
        assert_relative_eq!(score.precision, 1.0, epsilon = 1e-12);
        assert_relative_eq!(score.recall, 1.0, epsilon = 1e-12);
        assert_relative_eq!(score.negative_acc, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_duplicate_observation_times() {
        let err = score_detection(
            &[0, 300],
            &[1.0, 0.0],
            &[0, 0, 300],
            &[1.0, 1.0, 0.0],
            &ScoreConfig::default(),
        )
        .unwrap_err();
        match err {
            EvaluateError::Validation { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("duplicate timestamp 0 at index 1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_join_scores_zero() {
        let score = score_detection(
            &[0],
            &[1.0],
            &[300],
            &[1.0],
            &ScoreConfig::default(),
        )
        .unwrap();
        assert_eq!(score.total(), 0);
        assert_eq!(score.accuracy, 0.0);
    }

    #[test]
    fn threshold_is_strict() {
        let t = [0];
        let config = ScoreConfig::default().with_rain_threshold(0.1);
        let score = score_detection(&t, &[1.0], &t, &[0.1], &config).unwrap();
        assert_eq!(score.false_positives, 1);
        let score = score_detection(&t, &[1.0], &t, &[0.2], &config).unwrap();
        assert_eq!(score.true_positives, 1);
    }

    #[test]
    fn predictions_are_or_bucketed() {
        let score = score_detection(
            &[0, 60, 120, 300],
            &[0.0, 1.0, 0.0, 0.0],
            &[0, 300],
            &[1.0, 0.0],
            &ScoreConfig::default(),
        )
        .unwrap();
        assert_eq!(score.true_positives, 1);
        assert_eq!(score.true_negatives, 1);
    }

    #[test]
    fn rejects_non_binary_prediction() {
        let t = [0, 300];
        let err = score_detection(&t, &[1.0, 0.5], &t, &[0.0, 0.0], &ScoreConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            EvaluateError::InvalidInput {
                index: 1,
                value: 0.5
            }
        );
    }

    #[test]
    fn rejects_misaligned_and_empty() {
        let config = ScoreConfig::default();
        assert!(matches!(
            score_detection(&[0, 300], &[1.0], &[0], &[1.0], &config),
            Err(EvaluateError::MisalignedLength {
                name: "predicted",
                ..
            })
        ));
        assert!(matches!(
            score_detection(&[0], &[1.0], &[0, 300], &[1.0], &config),
            Err(EvaluateError::MisalignedLength {
                name: "observed",
                ..
            })
        ));
        assert_eq!(
            score_detection(&[], &[], &[0], &[1.0], &config),
            Err(EvaluateError::EmptyInput { name: "predicted" })
        );
        assert_eq!(
            score_detection(&[0], &[1.0], &[], &[], &config),
            Err(EvaluateError::EmptyInput { name: "observed" })
        );
    }

    #[test]
    fn counts_merge() {
        let a = ConfusionCounts {
            true_positives: 1,
            true_negatives: 2,
            false_positives: 0,
            false_negatives: 1,
        };
        let b = ConfusionCounts {
            true_positives: 3,
            ..ConfusionCounts::default()
        };
        let m = a.merged(b);
        assert_eq!(m.true_positives, 4);
        assert_eq!(m.total(), 7);
        assert_relative_eq!(m.accuracy(), 6.0 / 7.0, epsilon = 1e-12);
    }
}
