//! Progress reporting port for UI integration.

use std::path::PathBuf;

use crate::batch::Phase;

/// Events emitted by the batch orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A phase is about to dispatch `total` items.
    PhaseStarted {
        /// The phase.
        phase: Phase,
        /// Number of items in the phase.
        total: usize,
    },
    /// One item of a phase completed.
    Tick {
        /// The phase.
        phase: Phase,
        /// Source path of the completed item.
        path: PathBuf,
    },
    /// Every item of a phase completed.
    PhaseFinished {
        /// The phase.
        phase: Phase,
    },
}

/// Port for receiving progress events.
///
/// Called concurrently from worker threads.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_event(&self, _event: ProgressEvent) {}
}
