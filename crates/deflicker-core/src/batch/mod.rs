//! Two-phase batch orchestration.
//!
//! Every picture is analyzed on a bounded worker pool, then targets are
//! aggregated on the calling thread once all histograms exist, then every
//! picture is adjusted on the same pool. The first failing task stops
//! further scheduling within its phase; tasks already running finish.

mod state;

use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

pub use state::{BatchState, Phase};

use crate::domain::{BatchConfig, FrameReport, Picture, SequenceEntry};
use crate::error::{DeflickerError, Result};
use crate::matching::{apply_lut, assign_targets, extract_histogram, match_histograms};
use crate::ports::{PixelSink, PixelSource, ProgressEvent, ProgressSink};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of pictures written.
    pub processed: usize,
    /// Wall time of both phases.
    pub elapsed: Duration,
}

/// One deflicker run over an ordered sequence of pictures.
pub struct Batch<'a> {
    config: BatchConfig,
    pictures: Vec<Picture>,
    source: &'a dyn PixelSource,
    progress: &'a dyn ProgressSink,
    pool: ThreadPool,
    state: BatchState,
}

impl<'a> Batch<'a> {
    /// Creates a batch over `entries`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`DeflickerError::Configuration`] if `config` is invalid or the
    /// worker pool cannot be created.
    pub fn new(
        config: BatchConfig,
        entries: Vec<SequenceEntry>,
        source: &'a dyn PixelSource,
        progress: &'a dyn ProgressSink,
    ) -> Result<Self> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("deflicker-{i}"))
            .build()
            .map_err(|e| DeflickerError::Configuration(format!("failed to start workers: {e}")))?;

        debug!(
            "Batch of {} pictures, {} workers, {}",
            entries.len(),
            config.threads,
            config.averaging
        );

        Ok(Self {
            config,
            pictures: entries.into_iter().map(Picture::new).collect(),
            source,
            progress,
            pool,
            state: BatchState::Idle,
        })
    }

    /// Current state of the run.
    #[must_use]
    pub const fn state(&self) -> BatchState {
        self.state
    }

    /// Pictures in sequence order.
    #[must_use]
    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    /// Runs both phases and writes every adjusted picture to `sink`.
    ///
    /// # Errors
    ///
    /// Returns the first per-picture failure of either phase.
    pub fn run(&mut self, sink: &dyn PixelSink) -> Result<BatchSummary> {
        let started = Instant::now();
        self.analyze()?;
        self.adjust(sink)?;
        Ok(BatchSummary {
            processed: self.pictures.len(),
            elapsed: started.elapsed(),
        })
    }

    /// Extracts every picture's histogram, then assigns targets.
    ///
    /// # Errors
    ///
    /// Returns [`DeflickerError::InvalidState`] unless the batch is idle, or
    /// the first decode or row-range failure.
    pub fn analyze(&mut self) -> Result<()> {
        self.require_state(BatchState::Idle)?;
        if self.pictures.is_empty() {
            warn!("Empty sequence, nothing to analyze");
        }

        self.state = BatchState::Analyzing;
        let source = self.source;
        let rows = self.config.rows;
        let result = dispatch(
            &self.pool,
            &mut self.pictures,
            self.progress,
            Phase::Analyze,
            |picture| {
                let image = source.open(picture.source())?;
                picture.current = extract_histogram(&image, rows)?;
                debug!(
                    "Analyzed {} ({} pixels)",
                    picture.source().display(),
                    picture.current.total()
                );
                Ok(())
            },
        );
        self.settle(result)?;

        self.state = BatchState::Aggregating;
        info!("Aggregating targets ({})", self.config.averaging);
        assign_targets(&mut self.pictures, self.config.averaging);
        Ok(())
    }

    /// Matches every picture to its target and writes it to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`DeflickerError::InvalidState`] unless targets have been
    /// aggregated, or the first decode, empty-target or encode failure.
    pub fn adjust(&mut self, sink: &dyn PixelSink) -> Result<()> {
        self.require_state(BatchState::Aggregating)?;

        self.state = BatchState::Adjusting;
        let source = self.source;
        let encode = self.config.encode;
        let result = dispatch(
            &self.pool,
            &mut self.pictures,
            self.progress,
            Phase::Adjust,
            |picture| {
                let image = source.open(picture.source())?;
                let lut = match_histograms(&picture.current, &picture.target)?;
                let adjusted = apply_lut(&image, &lut);
                sink.save(&adjusted, picture.destination(), &encode)?;
                debug!("Wrote {}", picture.destination().display());
                Ok(())
            },
        );
        self.settle(result)?;

        self.state = BatchState::Done;
        Ok(())
    }

    /// One report per picture, in sequence order.
    ///
    /// # Errors
    ///
    /// Returns [`DeflickerError::InvalidState`] if targets have not been
    /// aggregated yet or the run failed.
    pub fn reports(&self) -> Result<Vec<FrameReport>> {
        match self.state {
            BatchState::Aggregating | BatchState::Adjusting | BatchState::Done => Ok(self
                .pictures
                .iter()
                .enumerate()
                .map(|(index, picture)| FrameReport::from_picture(index, picture))
                .collect()),
            actual => Err(DeflickerError::InvalidState {
                expected: BatchState::Aggregating,
                actual,
            }),
        }
    }

    fn require_state(&self, expected: BatchState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(DeflickerError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    fn settle(&mut self, result: Result<()>) -> Result<()> {
        if let Err(e) = &result {
            warn!("Batch aborted: {e}");
            self.state = BatchState::Failed;
        }
        result
    }
}

/// Runs `task` for every picture on `pool`, ticking `progress` per item.
///
/// Stops scheduling after the first error; running tasks finish.
fn dispatch<F>(
    pool: &ThreadPool,
    pictures: &mut [Picture],
    progress: &dyn ProgressSink,
    phase: Phase,
    task: F,
) -> Result<()>
where
    F: Fn(&mut Picture) -> Result<()> + Send + Sync,
{
    let started = Instant::now();
    info!("Starting {phase} of {} pictures", pictures.len());
    progress.on_event(ProgressEvent::PhaseStarted {
        phase,
        total: pictures.len(),
    });

    pool.install(|| {
        pictures.par_iter_mut().try_for_each(|picture| {
            task(picture).map_err(|e| e.for_picture(phase, picture.source()))?;
            progress.on_event(ProgressEvent::Tick {
                phase,
                path: picture.source().to_path_buf(),
            });
            Ok(())
        })
    })?;

    progress.on_event(ProgressEvent::PhaseFinished { phase });
    info!("Finished {phase} in {:.2?}", started.elapsed());
    Ok(())
}
