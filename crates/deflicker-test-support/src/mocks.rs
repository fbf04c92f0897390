//! Mock implementations of core port traits.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use deflicker_core::domain::{EncodeOptions, FrameReport, SequenceEntry};
use deflicker_core::error::{DeflickerError, Result};
use deflicker_core::ports::{
    PixelSink, PixelSource, ProgressEvent, ProgressSink, ReportOutput, SequenceSource,
};
use deflicker_core::Phase;
use image::{DynamicImage, ImageError};

fn missing(path: &Path) -> ImageError {
    ImageError::IoError(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} not in store", path.display()),
    ))
}

/// In-memory image store implementing both `PixelSource` and `PixelSink`.
///
/// Tracks reads and writes for assertions.
pub struct MemoryImageStore {
    sources: HashMap<PathBuf, DynamicImage>,
    written: Mutex<HashMap<PathBuf, (DynamicImage, EncodeOptions)>>,
    failing_writes: HashSet<PathBuf>,
    open_count: AtomicUsize,
}

impl MemoryImageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            written: Mutex::new(HashMap::new()),
            failing_writes: HashSet::new(),
            open_count: AtomicUsize::new(0),
        }
    }

    /// Adds a readable image.
    #[must_use]
    pub fn with_image(mut self, path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        self.sources.insert(path.into(), image);
        self
    }

    /// Makes writes to `path` fail with an encode error.
    #[must_use]
    pub fn failing_write(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing_writes.insert(path.into());
        self
    }

    /// Returns the image written to `path`, if any.
    #[must_use]
    pub fn written(&self, path: impl AsRef<Path>) -> Option<DynamicImage> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.as_ref())
            .map(|(image, _)| image.clone())
    }

    /// Returns the encode options used for `path`, if written.
    #[must_use]
    pub fn written_options(&self, path: impl AsRef<Path>) -> Option<EncodeOptions> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.as_ref())
            .map(|(_, options)| *options)
    }

    /// Number of images written.
    #[must_use]
    pub fn written_count(&self) -> usize {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of `open` calls, successful or not.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

impl Default for MemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSource for MemoryImageStore {
    fn open(&self, path: &Path) -> Result<DynamicImage> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        self.sources
            .get(path)
            .cloned()
            .ok_or_else(|| DeflickerError::Decode {
                path: path.to_path_buf(),
                source: missing(path),
            })
    }
}

impl PixelSink for MemoryImageStore {
    fn save(&self, image: &DynamicImage, path: &Path, options: &EncodeOptions) -> Result<()> {
        if self.failing_writes.contains(path) {
            return Err(DeflickerError::Encode {
                path: path.to_path_buf(),
                source: ImageError::IoError(std::io::Error::other("disk full")),
            });
        }
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), (image.clone(), *options));
        Ok(())
    }
}

/// Mock implementation of `SequenceSource` yielding fixed entries.
pub struct MockSequence {
    entries: Vec<SequenceEntry>,
}

impl MockSequence {
    /// Creates a sequence of `count` frames named `frame_NNNN.png`, written to `out/`.
    #[must_use]
    pub fn numbered(count: usize) -> Self {
        Self {
            entries: (0..count)
                .map(|i| {
                    SequenceEntry::new(
                        format!("frame_{i:04}.png"),
                        format!("out/frame_{i:04}.png"),
                    )
                })
                .collect(),
        }
    }

    /// Creates a sequence from explicit entries.
    #[must_use]
    pub const fn new(entries: Vec<SequenceEntry>) -> Self {
        Self { entries }
    }
}

impl SequenceSource for MockSequence {
    fn entries(&self) -> anyhow::Result<Vec<SequenceEntry>> {
        Ok(self.entries.clone())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of ticks received for `phase`.
    #[must_use]
    pub fn ticks(&self, phase: Phase) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Tick { phase: p, .. } if *p == phase))
            .count()
    }

    /// Returns whether `phase` reported completion.
    #[must_use]
    pub fn finished(&self, phase: Phase) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::PhaseFinished { phase: p } if *p == phase))
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Mock implementation of `ReportOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockReportOutput {
    reports: Arc<Mutex<Vec<FrameReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockReportOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<FrameReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockReportOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportOutput for MockReportOutput {
    fn write(&self, report: &FrameReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}
