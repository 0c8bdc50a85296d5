use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// linkrain: score microwave-link rain detection against rain gauges.
#[derive(Parser)]
#[command(
    name = "linkrain",
    version,
    about = "Evaluate link-based rain detection against gauges"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Detect rain on every link and score it against nearby gauges.
    Evaluate(EvaluateArgs),
}

/// Arguments for the `evaluate` subcommand.
#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "linkrain.toml")]
    pub config: PathBuf,

    /// Override the input batch JSON path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the report JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
