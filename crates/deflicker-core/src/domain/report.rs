//! Per-frame analysis report.

use serde::{Deserialize, Serialize};

use super::Picture;

/// Summary of one analyzed frame and the target it will be matched to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Path to the source image.
    pub path: String,
    /// Position in the sequence (0-based).
    pub index: usize,
    /// Number of pixels that contributed to the histogram.
    pub sampled_pixels: u64,
    /// Mean intensity of the frame, RGB order.
    pub mean: [f64; 3],
    /// Mean intensity of the target histogram, RGB order.
    pub target_mean: [f64; 3],
}

impl FrameReport {
    /// Builds a report from an aggregated picture.
    #[must_use]
    pub fn from_picture(index: usize, picture: &Picture) -> Self {
        Self {
            path: picture.source().to_string_lossy().into_owned(),
            index,
            sampled_pixels: picture.current.total(),
            mean: picture.current.means(),
            target_mean: picture.target.means(),
        }
    }
}
