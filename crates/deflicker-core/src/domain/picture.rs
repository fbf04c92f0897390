//! Units of work in a batch run.

use std::path::{Path, PathBuf};

use super::histogram::RgbHistogram;

/// Source and destination of one frame, as produced by a sequence source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceEntry {
    /// Image to read.
    pub source: PathBuf,
    /// Where the adjusted image is written.
    pub destination: PathBuf,
}

impl SequenceEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// One frame of the sequence and the histograms computed for it.
///
/// `current` is filled during analysis, `target` during aggregation.
#[derive(Debug, Clone)]
pub struct Picture {
    entry: SequenceEntry,
    /// Histogram of the frame's own pixels.
    pub current: RgbHistogram,
    /// Histogram the frame is matched towards.
    pub target: RgbHistogram,
}

impl Picture {
    /// Creates a picture with empty histograms.
    #[must_use]
    pub const fn new(entry: SequenceEntry) -> Self {
        Self {
            entry,
            current: RgbHistogram::new(),
            target: RgbHistogram::new(),
        }
    }

    /// Path of the source image.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.entry.source
    }

    /// Path the adjusted image is written to.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.entry.destination
    }
}

impl From<SequenceEntry> for Picture {
    fn from(entry: SequenceEntry) -> Self {
        Self::new(entry)
    }
}
