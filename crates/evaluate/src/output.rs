//! Report structures for per-link and batch evaluation.

use std::collections::BTreeMap;
use std::fmt;

use linkrain_series::TimeWindow;
use serde::Serialize;

use crate::error::EvaluateError;
use crate::scoring::{ConfusionCounts, DetectionScore};

/// Why a link produced no score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// A site coordinate is missing.
    MissingCoordinates,
    /// Every RSL sample is missing.
    NoSignalData,
    /// No gauge with data lies within the search radius.
    NoReference,
    /// The link and reference time ranges do not intersect.
    NoOverlap,
    /// Prediction and reference share no timestamp after bucketing.
    NoJoinedRows,
    /// Building the reference series failed.
    Aggregation { reason: String },
    /// The detector output could not be aligned.
    InvalidDetection { reason: String },
}

impl SkipReason {
    /// Stable snake_case key, matching the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::MissingCoordinates => "missing_coordinates",
            SkipReason::NoSignalData => "no_signal_data",
            SkipReason::NoReference => "no_reference",
            SkipReason::NoOverlap => "no_overlap",
            SkipReason::NoJoinedRows => "no_joined_rows",
            SkipReason::Aggregation { .. } => "aggregation",
            SkipReason::InvalidDetection { .. } => "invalid_detection",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCoordinates => write!(f, "missing site coordinates"),
            SkipReason::NoSignalData => write!(f, "no RSL data"),
            SkipReason::NoReference => write!(f, "no reference available"),
            SkipReason::NoOverlap => write!(f, "no overlapping time range"),
            SkipReason::NoJoinedRows => write!(f, "no joined time steps"),
            SkipReason::Aggregation { reason } => write!(f, "aggregation failed: {reason}"),
            SkipReason::InvalidDetection { reason } => write!(f, "invalid detection: {reason}"),
        }
    }
}

/// Result of evaluating one link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkOutcome {
    Scored { score: DetectionScore },
    Skipped { reason: SkipReason },
}

impl LinkOutcome {
    pub fn score(&self) -> Option<&DetectionScore> {
        match self {
            LinkOutcome::Scored { score } => Some(score),
            LinkOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            LinkOutcome::Scored { .. } => None,
            LinkOutcome::Skipped { reason } => Some(reason),
        }
    }
}

/// Per-link report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkReport {
    pub cml_id: String,
    pub sublink_id: String,
    /// Gauges found within the search radius.
    pub gauges_used: usize,
    /// Common window of link and reference, when alignment got that far.
    pub window: Option<TimeWindow>,
    pub outcome: LinkOutcome,
}

/// Report for a batch of links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub n_links: usize,
    pub n_scored: usize,
    pub n_skipped: usize,
    /// Skipped links per [`SkipReason::kind`].
    pub skipped_by_reason: BTreeMap<&'static str, usize>,
    /// Confusion tallies summed over every scored link.
    pub totals: ConfusionCounts,
    /// Accuracy of `totals`.
    pub overall_accuracy: f64,
    pub links: Vec<LinkReport>,
}

impl BatchReport {
    /// Build summary counts from per-link reports.
    pub fn from_links(links: Vec<LinkReport>) -> Self {
        let totals = links
            .iter()
            .filter_map(|l| l.outcome.score())
            .fold(ConfusionCounts::default(), |acc, s| acc.merged(s.counts()));
        let n_scored = links.iter().filter(|l| l.outcome.score().is_some()).count();
        let mut skipped_by_reason = BTreeMap::new();
        for reason in links.iter().filter_map(|l| l.outcome.skip_reason()) {
            *skipped_by_reason.entry(reason.kind()).or_insert(0) += 1;
        }
        Self {
            n_links: links.len(),
            n_scored,
            n_skipped: links.len() - n_scored,
            skipped_by_reason,
            totals,
            overall_accuracy: totals.accuracy(),
            links,
        }
    }
}

/// Serialize a report to pretty-printed JSON.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(report).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skipped(id: &str, reason: SkipReason) -> LinkReport {
        LinkReport {
            cml_id: id.to_string(),
            sublink_id: "channel_1".to_string(),
            gauges_used: 0,
            window: None,
            outcome: LinkOutcome::Skipped { reason },
        }
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::NoReference.to_string(), "no reference available");
        assert_eq!(
            SkipReason::Aggregation {
                reason: "no gauges".to_string()
            }
            .to_string(),
            "aggregation failed: no gauges"
        );
    }

    #[test]
    fn kind_matches_serialized_tag() {
        let reason = SkipReason::Aggregation {
            reason: "x".to_string(),
        };
        let json = serde_json::to_string(&reason).unwrap();
        assert!(json.contains(&format!("\"kind\":\"{}\"", reason.kind())));
        let json = serde_json::to_string(&SkipReason::NoJoinedRows).unwrap();
        assert!(json.contains("\"kind\":\"no_joined_rows\""));
    }

    #[test]
    fn skipped_link_serializes_with_tags() {
        let json = serde_json::to_string(&skipped("7", SkipReason::NoOverlap)).unwrap();
        assert!(json.contains("\"cml_id\":\"7\""));
        assert!(json.contains("\"status\":\"skipped\""));
        assert!(json.contains("\"kind\":\"no_overlap\""));
        assert!(json.contains("\"window\":null"));
    }

    #[test]
    fn batch_report_counts_skips() {
        let report = BatchReport::from_links(vec![
            skipped("1", SkipReason::NoSignalData),
            skipped("2", SkipReason::MissingCoordinates),
            skipped("3", SkipReason::NoSignalData),
        ]);
        assert_eq!(report.n_links, 3);
        assert_eq!(report.n_scored, 0);
        assert_eq!(report.n_skipped, 3);
        assert_eq!(report.skipped_by_reason.get("no_signal_data"), Some(&2));
        assert_eq!(report.skipped_by_reason.get("missing_coordinates"), Some(&1));
        assert_eq!(report.skipped_by_reason.get("no_overlap"), None);
        assert_eq!(report.totals.total(), 0);
        assert_eq!(report.overall_accuracy, 0.0);
    }

    #[test]
    fn to_json_pretty() {
        let report = BatchReport::from_links(vec![]);
        let json = to_json(&report).unwrap();
        assert!(json.contains("\"n_links\": 0"));
        assert!(json.contains("\"links\": []"));
    }
}
