//! CLI command definitions and handlers.

pub mod analyze;
pub mod run;

use std::num::NonZeroUsize;

use clap::{Args, Parser, Subcommand};
use deflicker_core::{AveragingMode, RowRange};

use crate::config::AppConfig;

/// Deflicker - remove brightness flicker from timelapse sequences
#[derive(Parser)]
#[command(name = "deflicker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared run arguments (directories, tuning, output).
    #[command(flatten)]
    pub run: run::RunArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Deflicker a directory of frames into another directory
    Run(run::RunArgs),
    /// Report per-frame brightness and targets without writing images
    Analyze(analyze::AnalyzeArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every frame processed.
    Success,
    /// Configuration, I/O or per-frame failure.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::Error => Self::from(2),
        }
    }
}

/// Parse a worker count (at least 1).
fn parse_threads(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value == 0 {
        Err("worker count must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Arguments shared by every command that analyzes a sequence.
#[derive(Args, Clone, Default)]
pub struct BatchArgs {
    /// Worker threads (default: available cores)
    #[arg(short, long, value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// Rolling average radius in frames; 0 averages the whole sequence
    #[arg(short, long)]
    pub window: Option<usize>,

    /// First pixel row sampled for histograms
    #[arg(long, value_name = "ROW")]
    pub start_y: Option<u32>,

    /// Row after the last one sampled (default: image height)
    #[arg(long, value_name = "ROW")]
    pub stop_y: Option<u32>,
}

impl BatchArgs {
    /// Fill unset values from the config file; CLI values win.
    pub fn apply_config(&mut self, config: &AppConfig) {
        self.threads = self.threads.or(config.general.threads);
        self.window = self.window.or(config.averaging.window);
        self.start_y = self.start_y.or(config.sampling.start_y);
        self.stop_y = self.stop_y.or(config.sampling.stop_y);
    }

    /// Worker count with fallback to available parallelism.
    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
        })
    }

    /// Averaging mode with fallback to the global average.
    pub fn averaging(&self) -> AveragingMode {
        AveragingMode::from_window(self.window.unwrap_or(0))
    }

    /// Sampled rows with fallback to the full image.
    pub fn rows(&self) -> RowRange {
        RowRange::new(self.start_y.unwrap_or(0), self.stop_y)
    }
}
