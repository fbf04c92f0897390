//! Analyze command - report per-frame brightness without writing images.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use deflicker_adapters::{FsPixelStore, FsSequenceSource};
use deflicker_core::{Batch, BatchConfig, Phase, ReportOutput, SequenceSource};
use tracing::info;

use super::BatchArgs;
use crate::config::AppConfig;
use crate::output::{JsonOutput, PhaseProgress};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Arguments for analyzing a sequence.
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Directory containing the source frames
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Sequence analysis options.
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.batch.apply_config(config);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }
        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first.
pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = BatchConfig {
        threads: args.batch.threads(),
        averaging: args.batch.averaging(),
        rows: args.batch.rows(),
        ..BatchConfig::default()
    };
    config.validate()?;

    let entries = FsSequenceSource::new(&args.source).entries()?;
    info!("Analyzing {} frames in {}", entries.len(), args.source.display());

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = PhaseProgress::new(&[Phase::Analyze], entries.len(), show_progress);

    let store = FsPixelStore::new();
    let mut batch = Batch::new(config, entries, &store, &progress)?;
    let result = batch.analyze();
    progress.finish();
    result?;

    let reports = batch.reports()?;
    let output = JsonOutput::stdout();
    match args.format() {
        OutputFormat::Jsonl => {
            for report in &reports {
                output.write(report)?;
            }
        }
        OutputFormat::Json => output.write_array(&reports, args.pretty)?,
    }
    output.flush()?;

    Ok(())
}
