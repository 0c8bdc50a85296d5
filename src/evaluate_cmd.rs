//! Evaluate command: detect rain on each link and score it against gauges.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::DateTime;
use tracing::{info, info_span, warn};

use linkrain_evaluate::{BatchReport, LinkOutcome, evaluate_links, to_json};

use crate::cli::EvaluateArgs;
use crate::config::LinkrainConfig;
use crate::{convert, input};

/// Render Unix seconds as a UTC timestamp for log lines.
fn format_time(t: i64) -> String {
    DateTime::from_timestamp(t, 0)
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| t.to_string())
}

fn load_config(path: &Path) -> Result<LinkrainConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Run the pipeline over a JSON batch.
pub fn evaluate_batch(config: &LinkrainConfig, batch_json: &str) -> Result<BatchReport> {
    let pipeline = convert::build_pipeline_config(config)?;
    let detector = convert::build_detector(&config.detector)?;

    let batch = input::parse_batch(batch_json)?;
    let network = input::build_network(batch.gauges)?;
    let links = input::build_links(batch.links)?;
    info!(
        n_links = links.len(),
        n_gauges = network.len(),
        n_gauges_dropped = network.n_dropped(),
        "batch loaded"
    );

    let report =
        evaluate_links(&links, &network, &detector, &pipeline).context("evaluation failed")?;

    for link in &report.links {
        match (&link.outcome, link.window) {
            (LinkOutcome::Scored { score }, Some(window)) => info!(
                cml_id = %link.cml_id,
                sublink_id = %link.sublink_id,
                start = %format_time(window.start()),
                end = %format_time(window.end()),
                accuracy = score.accuracy,
                "link scored"
            ),
            (LinkOutcome::Skipped { reason }, _) => warn!(
                cml_id = %link.cml_id,
                sublink_id = %link.sublink_id,
                %reason,
                "link skipped"
            ),
            _ => {}
        }
    }
    Ok(report)
}

/// Run the evaluate command.
pub fn run(args: EvaluateArgs) -> Result<()> {
    let _cmd = info_span!("evaluate").entered();
    let config = load_config(&args.config)?;

    let input_path: PathBuf = args
        .input
        .or_else(|| config.io.input.clone())
        .ok_or_else(|| anyhow::anyhow!("no input path: set [io].input in config or use --input"))?;

    info!(path = %input_path.display(), "reading batch");
    let batch_json = std::fs::read_to_string(&input_path)
        .with_context(|| format!("failed to read batch: {}", input_path.display()))?;

    let report = evaluate_batch(&config, &batch_json)?;
    info!(
        n_scored = report.n_scored,
        n_skipped = report.n_skipped,
        overall_accuracy = report.overall_accuracy,
        "evaluation finished"
    );

    let json = to_json(&report).context("failed to serialize report")?;
    let report_path = args
        .output
        .or_else(|| config.io.output.clone())
        .unwrap_or_else(|| input_path.with_extension("report.json"));
    std::fs::write(&report_path, json)
        .with_context(|| format!("failed to write report: {}", report_path.display()))?;
    info!(path = %report_path.display(), "report written");

    Ok(())
}
