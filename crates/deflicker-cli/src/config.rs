//! Configuration file support for deflicker.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/deflicker/config.toml` (lowest priority)
//! - Project-local: `.deflicker.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use deflicker_core::PngCompression;
use serde::Deserialize;
use tracing::{debug, info};

/// Project-local config file name.
const PROJECT_FILE: &str = ".deflicker.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Target histogram averaging.
    pub averaging: AveragingConfig,
    /// Histogram sampling rows.
    pub sampling: SamplingConfig,
    /// Output encoding and formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Worker thread count.
    pub threads: Option<usize>,
}

/// Averaging configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AveragingConfig {
    /// Rolling window radius; 0 selects the global average.
    pub window: Option<usize>,
}

/// Sampling configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// First sampled row.
    pub start_y: Option<u32>,
    /// Row after the last sampled one.
    pub stop_y: Option<u32>,
}

/// Output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG quality (1-100).
    pub jpeg_quality: Option<u8>,
    /// PNG compression: "fast", "default" or "best".
    pub png_compression: Option<String>,
    /// Show progress bars.
    pub progress: Option<bool>,
    /// Report format for `analyze`: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON reports.
    pub pretty: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/deflicker/config.toml`
    /// 2. Project-local: `.deflicker.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// PNG compression parsed from the config, if set and valid.
    pub fn png_compression(&self) -> Option<PngCompression> {
        self.output
            .png_compression
            .as_deref()
            .and_then(|s| s.parse().ok())
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if self.general.threads == Some(0) {
            return Err("general.threads must be at least 1".to_string());
        }

        if let Some(q) = self.output.jpeg_quality {
            if !(1..=100).contains(&q) {
                return Err(format!("output.jpeg_quality must be 1-100, got {q}"));
            }
        }

        if let Some(ref c) = self.output.png_compression {
            c.parse::<PngCompression>()
                .map_err(|e| format!("output.png_compression: {e}"))?;
        }

        if let (Some(start), Some(stop)) = (self.sampling.start_y, self.sampling.stop_y) {
            if stop <= start {
                return Err(format!(
                    "sampling.stop_y ({stop}) must be greater than sampling.start_y ({start})"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.threads = other.general.threads.or(self.general.threads);

        self.averaging.window = other.averaging.window.or(self.averaging.window);

        self.sampling.start_y = other.sampling.start_y.or(self.sampling.start_y);
        self.sampling.stop_y = other.sampling.stop_y.or(self.sampling.stop_y);

        self.output.jpeg_quality = other.output.jpeg_quality.or(self.output.jpeg_quality);
        self.output.png_compression = other
            .output
            .png_compression
            .or_else(|| self.output.png_compression.take());
        self.output.progress = other.output.progress.or(self.output.progress);
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("deflicker").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.deflicker.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
