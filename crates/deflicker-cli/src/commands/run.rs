//! Run command - deflicker a sequence into a destination directory.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use deflicker_adapters::{FsPixelStore, FsSequenceSource};
use deflicker_core::{Batch, BatchConfig, EncodeOptions, Phase, PngCompression, SequenceSource};
use tracing::info;

use super::BatchArgs;
use crate::config::AppConfig;
use crate::output::PhaseProgress;

/// Hardcoded default values for encoder options.
mod defaults {
    pub const JPEG_QUALITY: u8 = 95;
}

/// Arguments for deflickering a sequence.
#[derive(Args, Clone)]
pub struct RunArgs {
    /// Directory containing the source frames
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Directory the adjusted frames are written to
    #[arg(value_name = "DESTINATION")]
    pub destination: Option<PathBuf>,

    /// Sequence analysis options.
    #[command(flatten)]
    pub batch: BatchArgs,

    /// JPEG output quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: Option<u8>,

    /// PNG compression: fast, default or best
    #[arg(long, value_name = "LEVEL")]
    pub png_compression: Option<PngCompression>,

    /// Show progress bars
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl RunArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.batch.apply_config(config);
        args.jpeg_quality = args.jpeg_quality.or(config.output.jpeg_quality);
        args.png_compression = args.png_compression.or_else(|| config.png_compression());
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }
        args
    }

    /// Encoder options with fallback to hardcoded defaults.
    fn encode(&self) -> EncodeOptions {
        EncodeOptions {
            jpeg_quality: self.jpeg_quality.unwrap_or(defaults::JPEG_QUALITY),
            png_compression: self.png_compression.unwrap_or_default(),
        }
    }

    /// Full batch configuration.
    fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            threads: self.batch.threads(),
            averaging: self.batch.averaging(),
            rows: self.batch.rows(),
            encode: self.encode(),
        }
    }
}

/// Run the deflicker command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &RunArgs) -> Result<()> {
    let (Some(source), Some(destination)) = (&args.source, &args.destination) else {
        bail!("SOURCE and DESTINATION are required. Use --help for usage information.");
    };

    let config = args.batch_config();
    config.validate()?;

    let entries = FsSequenceSource::new(source)
        .with_destination(destination)
        .entries()?;
    info!(
        "Deflickering {} frames from {} into {}",
        entries.len(),
        source.display(),
        destination.display()
    );

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = PhaseProgress::new(
        &[Phase::Analyze, Phase::Adjust],
        entries.len(),
        show_progress,
    );

    if !args.quiet {
        progress.println(&format!(
            "Starting: {} frames, {} threads, {}",
            entries.len(),
            config.threads,
            config.averaging
        ));
    }

    let store = FsPixelStore::new();
    let mut batch = Batch::new(config, entries, &store, &progress)?;
    let result = batch.run(&store);
    progress.finish();
    let summary = result?;

    if !args.quiet {
        progress.println(&format!(
            "Finished: {} frames in {:.2?}",
            summary.processed, summary.elapsed
        ));
    }

    Ok(())
}
