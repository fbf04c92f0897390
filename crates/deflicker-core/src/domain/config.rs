//! Batch configuration types.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::str::FromStr;

use crate::error::{DeflickerError, Result};

/// How target histograms are derived from the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AveragingMode {
    /// One average over the whole sequence, shared by every picture.
    #[default]
    Global,
    /// Per-picture average over `radius` neighbours on each side.
    Window {
        /// Neighbours on each side of the picture.
        radius: NonZeroUsize,
    },
}

impl AveragingMode {
    /// Maps a window size to a mode; anything below 1 means global.
    #[must_use]
    pub fn from_window(window: usize) -> Self {
        NonZeroUsize::new(window).map_or(Self::Global, |radius| Self::Window { radius })
    }
}

impl fmt::Display for AveragingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global average"),
            Self::Window { radius } => write!(f, "rolling average (radius {radius})"),
        }
    }
}

/// Rows sampled for histogram extraction: `start..stop`.
///
/// `stop = None` means "to the bottom of the image".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowRange {
    /// First sampled row (inclusive).
    pub start: u32,
    /// Row after the last sampled one, or full height when unset.
    pub stop: Option<u32>,
}

impl RowRange {
    /// Every row of the image.
    pub const FULL: Self = Self {
        start: 0,
        stop: None,
    };

    /// Creates a range.
    #[must_use]
    pub const fn new(start: u32, stop: Option<u32>) -> Self {
        Self { start, stop }
    }

    /// Resolves the range against an image of `height` rows.
    ///
    /// # Errors
    ///
    /// Returns [`DeflickerError::InvalidRange`] if `stop` exceeds the image
    /// height or the range is empty or inverted.
    pub fn resolve(&self, height: u32) -> Result<Range<u32>> {
        let stop = self.stop.unwrap_or(height);
        if stop > height || self.start >= stop {
            return Err(DeflickerError::InvalidRange {
                start: self.start,
                stop,
                height: Some(height),
            });
        }
        Ok(self.start..stop)
    }
}

/// PNG compression preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Fastest encoding, larger files.
    Fast,
    /// Encoder default.
    #[default]
    Default,
    /// Smallest files, slowest encoding.
    Best,
}

impl FromStr for PngCompression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "default" => Ok(Self::Default),
            "best" => Ok(Self::Best),
            other => Err(format!(
                "'{other}' is not a PNG compression (fast, default, best)"
            )),
        }
    }
}

impl fmt::Display for PngCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fast => "fast",
            Self::Default => "default",
            Self::Best => "best",
        })
    }
}

/// Format-specific encoder parameters passed to the pixel sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
    /// PNG compression preset.
    pub png_compression: PngCompression,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            png_compression: PngCompression::Default,
        }
    }
}

/// Read-only settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Worker pool size.
    pub threads: usize,
    /// Target histogram averaging.
    pub averaging: AveragingMode,
    /// Rows sampled for histograms.
    pub rows: RowRange,
    /// Output encoder parameters.
    pub encode: EncodeOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
            averaging: AveragingMode::Global,
            rows: RowRange::FULL,
            encode: EncodeOptions::default(),
        }
    }
}

impl BatchConfig {
    /// Checks the values that cannot be expressed by the types alone.
    ///
    /// # Errors
    ///
    /// Returns [`DeflickerError::Configuration`] on a zero worker count or
    /// a JPEG quality outside 1-100, and [`DeflickerError::InvalidRange`]
    /// when the stop row is not after the start row.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(DeflickerError::Configuration(
                "worker count must be at least 1".into(),
            ));
        }
        if !(1..=100).contains(&self.encode.jpeg_quality) {
            return Err(DeflickerError::Configuration(format!(
                "JPEG quality must be 1-100, got {}",
                self.encode.jpeg_quality
            )));
        }
        if let Some(stop) = self.rows.stop {
            if stop <= self.rows.start {
                return Err(DeflickerError::InvalidRange {
                    start: self.rows.start,
                    stop,
                    height: None,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_resolves_to_height() {
        assert_eq!(RowRange::FULL.resolve(480).ok(), Some(0..480));
    }

    #[test]
    fn test_partial_range() {
        assert_eq!(RowRange::new(10, Some(20)).resolve(480).ok(), Some(10..20));
        assert_eq!(RowRange::new(10, None).resolve(480).ok(), Some(10..480));
    }

    #[test]
    fn test_stop_beyond_height_rejected() {
        let err = RowRange::new(0, Some(481)).resolve(480).unwrap_err();
        assert!(matches!(
            err,
            DeflickerError::InvalidRange {
                start: 0,
                stop: 481,
                height: Some(480)
            }
        ));
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(RowRange::new(5, Some(5)).resolve(10).is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(RowRange::new(8, Some(4)).resolve(10).is_err());
        // Start below the bottom with an open stop is inverted too.
        assert!(RowRange::new(12, None).resolve(10).is_err());
    }

    #[test]
    fn test_averaging_from_window() {
        assert_eq!(AveragingMode::from_window(0), AveragingMode::Global);
        assert_eq!(
            AveragingMode::from_window(3),
            AveragingMode::Window {
                radius: NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN)
            }
        );
    }

    #[test]
    fn test_png_compression_parse() {
        assert_eq!("best".parse::<PngCompression>(), Ok(PngCompression::Best));
        assert_eq!("FAST".parse::<PngCompression>(), Ok(PngCompression::Fast));
        assert!("9".parse::<PngCompression>().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(BatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = BatchConfig {
            threads: 0,
            ..BatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DeflickerError::Configuration(_))
        ));
    }

    #[test]
    fn test_jpeg_quality_out_of_range_rejected() {
        let mut config = BatchConfig::default();
        config.encode.jpeg_quality = 0;
        assert!(config.validate().is_err());
        config.encode.jpeg_quality = 101;
        assert!(config.validate().is_err());
        config.encode.jpeg_quality = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_rows_rejected_upfront() {
        let config = BatchConfig {
            rows: RowRange::new(10, Some(10)),
            ..BatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DeflickerError::InvalidRange {
                start: 10,
                stop: 10,
                height: None
            })
        ));
    }
}
