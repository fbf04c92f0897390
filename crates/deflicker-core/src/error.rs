//! Error taxonomy for the deflicker pipeline.

use std::path::PathBuf;

use crate::batch::{BatchState, Phase};
use crate::domain::Channel;

/// Errors raised by the histogram-matching pipeline.
///
/// Every variant is fatal to a batch run.
#[derive(Debug, thiserror::Error)]
pub enum DeflickerError {
    /// Row bounds outside the image or inverted.
    #[error("invalid row range {start}..{stop}{}", image_height(*height))]
    InvalidRange {
        /// Requested first row (inclusive).
        start: u32,
        /// Requested stop row (exclusive), after resolving "full height".
        stop: u32,
        /// Image height, unset when the range is rejected before any image is read.
        height: Option<u32>,
    },

    /// A target histogram with zero total pixels.
    #[error("target histogram for the {channel} channel is empty")]
    EmptyTarget {
        /// Channel whose target histogram had no mass.
        channel: Channel,
    },

    /// The pixel source could not read an image.
    #[error("failed to decode {}", path.display())]
    Decode {
        /// Source path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// The pixel sink could not write an image.
    #[error("failed to encode {}", path.display())]
    Encode {
        /// Destination path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// Invalid batch configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A batch phase was requested out of order.
    #[error("batch is {actual:?}, expected {expected:?}")]
    InvalidState {
        /// State required by the requested phase.
        expected: BatchState,
        /// State the batch was actually in.
        actual: BatchState,
    },

    /// A per-picture failure, tagged with the picture that caused it.
    #[error("{phase} failed for {}", path.display())]
    Picture {
        /// Phase the picture was in.
        phase: Phase,
        /// Source path of the picture.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: Box<DeflickerError>,
    },
}

impl DeflickerError {
    /// Attaches the failing picture to errors that do not already name a path.
    #[must_use]
    pub fn for_picture(self, phase: Phase, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::InvalidRange { .. } | Self::EmptyTarget { .. } => Self::Picture {
                phase,
                path: path.into(),
                source: Box::new(self),
            },
            other => other,
        }
    }

    /// Returns the innermost error, looking through [`DeflickerError::Picture`].
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Picture { source, .. } => source.root(),
            other => other,
        }
    }
}

fn image_height(height: Option<u32>) -> String {
    height.map_or_else(String::new, |h| format!(" for image of height {h}"))
}

/// Result alias used throughout the core crate.
pub type Result<T, E = DeflickerError> = std::result::Result<T, E>;
