//! Batch state machine.

use std::fmt;

/// Lifecycle of a batch run.
///
/// `Idle -> Analyzing -> Aggregating -> Adjusting -> Done`, with `Failed`
/// reachable from `Analyzing` and `Adjusting`. A batch stays `Aggregating`
/// once targets are assigned until adjustment starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Created, nothing dispatched yet.
    Idle,
    /// Extracting current histograms.
    Analyzing,
    /// Computing target histograms.
    Aggregating,
    /// Synthesizing and applying LUTs, writing outputs.
    Adjusting,
    /// Every output written.
    Done,
    /// A per-picture task failed; no further work is scheduled.
    Failed,
}

/// Parallel phase of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Histogram extraction.
    Analyze,
    /// LUT synthesis, application and output.
    Adjust,
}

impl Phase {
    /// Short lowercase name, used for progress bars.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::Adjust => "adjust",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
