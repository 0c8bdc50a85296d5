//! # linkrain-evaluate
//!
//! Scores link rain detection against nearby rain gauges.
//!
//! ```text
//! evaluate_links(links, network, detector, config)     (rayon, order kept)
//!   └─ evaluate_link()
//!        ├─ GaugeNetwork::find_near(center, radius)
//!        ├─ average_gauges() → optional bin_mean()
//!        ├─ detector.detect(attenuation)
//!        ├─ align_detection()
//!        └─ score_aligned()  OR-bucket → inner join → confusion matrix
//! ```
//!
//! Per-link problems are reported as [`LinkOutcome::Skipped`]; they never
//! abort a batch.

mod config;
mod error;
mod link;
mod output;
mod scoring;
mod timeseries;

use linkrain_gauge::{GaugeError, GaugeNetwork, GaugeSensor, average_gauges, bin_mean};
use linkrain_series::{PointSeries, TimeWindow};
use linkrain_wetdry::{WetDryDetector, WetDryError, align_detection};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::scoring::score_alignment;

pub use config::{PipelineConfig, ScoreConfig};
pub use error::EvaluateError;
pub use link::{LinkMetadata, LinkRecord, Polarization};
pub use output::{BatchReport, LinkOutcome, LinkReport, SkipReason, to_json};
pub use scoring::{
    Category, ConfusionCounts, ConfusionRecord, DetectionScore, score_aligned, score_detection,
};
pub use timeseries::{JoinedRow, inner_join, or_resample};

/// Reference series for a link, `Ok(None)` when no usable gauge is near.
fn build_reference(
    near: &[&GaugeSensor],
    step: i64,
    config: &PipelineConfig,
) -> Result<Option<PointSeries>, SkipReason> {
    let averaged = match average_gauges(near, step) {
        Ok(averaged) => averaged,
        Err(GaugeError::NoGauges) => return Ok(None),
        Err(e) => {
            return Err(SkipReason::Aggregation {
                reason: e.to_string(),
            });
        }
    };
    let series = averaged.into_series();
    match config.score().gauge_bin_size() {
        Some(bin_size) => bin_mean(&series, bin_size)
            .map(Some)
            .map_err(|e| SkipReason::Aggregation {
                reason: e.to_string(),
            }),
        None => Ok(Some(series)),
    }
}

fn skip_reason_for(err: WetDryError) -> SkipReason {
    match err {
        WetDryError::NoReference => SkipReason::NoReference,
        WetDryError::NoOverlap => SkipReason::NoOverlap,
        other => SkipReason::InvalidDetection {
            reason: other.to_string(),
        },
    }
}

#[derive(Debug, Default)]
struct LinkTrace {
    gauges_used: usize,
    window: Option<TimeWindow>,
}

fn run_link<D: WetDryDetector + ?Sized>(
    link: &LinkRecord,
    network: &GaugeNetwork,
    detector: &D,
    config: &PipelineConfig,
    trace: &mut LinkTrace,
) -> Result<DetectionScore, SkipReason> {
    let meta = link.metadata();
    if meta.has_missing_coordinates() {
        return Err(SkipReason::MissingCoordinates);
    }
    if link.has_no_signal() {
        return Err(SkipReason::NoSignalData);
    }

    let near: Vec<&GaugeSensor> = network
        .find_near(meta.center(), config.max_distance_m())
        .into_iter()
        .map(|(_, g)| g)
        .collect();
    trace.gauges_used = near.len();

    let step = linkrain_stats::dominant_step(link.timestamps()).unwrap_or(config.default_step());
    let reference = build_reference(&near, step, config)?;

    let output = detector.detect(&link.attenuation());
    let aligned = align_detection(
        link.timestamps(),
        &output,
        reference.as_ref(),
        config.align(),
    )
    .map_err(skip_reason_for)?;
    trace.window = Some(aligned.window());

    let score = score_alignment(&aligned, config.score());
    if score.total() == 0 {
        return Err(SkipReason::NoJoinedRows);
    }
    Ok(score)
}

/// Evaluate one link against the gauges near its center.
///
/// The reference grid uses the link's dominant sampling step, falling back
/// to [`PipelineConfig::default_step`].
///
/// # Errors
///
/// Returns [`EvaluateError::InvalidConfig`] if `config` is invalid. Every
/// other problem yields a [`LinkOutcome::Skipped`] report.
#[tracing::instrument(
    skip_all,
    fields(cml_id = %link.metadata().cml_id, sublink_id = %link.metadata().sublink_id)
)]
pub fn evaluate_link<D: WetDryDetector + ?Sized>(
    link: &LinkRecord,
    network: &GaugeNetwork,
    detector: &D,
    config: &PipelineConfig,
) -> Result<LinkReport, EvaluateError> {
    config.validate()?;
    let mut trace = LinkTrace::default();
    let outcome = match run_link(link, network, detector, config, &mut trace) {
        Ok(score) => {
            debug!(
                gauges_used = trace.gauges_used,
                n_steps = score.total(),
                accuracy = score.accuracy,
                "link scored"
            );
            LinkOutcome::Scored { score }
        }
        Err(reason) => {
            debug!(gauges_used = trace.gauges_used, %reason, "link skipped");
            LinkOutcome::Skipped { reason }
        }
    };

    let meta = link.metadata();
    Ok(LinkReport {
        cml_id: meta.cml_id.clone(),
        sublink_id: meta.sublink_id.clone(),
        gauges_used: trace.gauges_used,
        window: trace.window,
        outcome,
    })
}

/// Evaluate every link in parallel.
///
/// Reports keep the order of `links`. One link's failure never affects
/// another's.
///
/// # Errors
///
/// Returns [`EvaluateError::InvalidConfig`] if `config` is invalid.
#[tracing::instrument(skip_all, fields(n_links = links.len(), n_gauges = network.len()))]
pub fn evaluate_links<D: WetDryDetector + Sync + ?Sized>(
    links: &[LinkRecord],
    network: &GaugeNetwork,
    detector: &D,
    config: &PipelineConfig,
) -> Result<BatchReport, EvaluateError> {
    config.validate()?;
    let reports = links
        .par_iter()
        .map(|link| evaluate_link(link, network, detector, config))
        .collect::<Result<Vec<_>, _>>()?;

    let batch = BatchReport::from_links(reports);
    info!(
        n_scored = batch.n_scored,
        n_skipped = batch.n_skipped,
        overall_accuracy = batch.overall_accuracy,
        "batch evaluated"
    );
    Ok(batch)
}
