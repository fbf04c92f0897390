//! Target histogram aggregation across the sequence.

use crate::domain::{AveragingMode, Picture, RgbHistogram};

/// Computes one target histogram per input histogram.
///
/// In global mode every target is the bucket-wise truncating mean of the
/// whole sequence. In window mode the target at `i` averages the histograms
/// in `[i - radius, i + radius]`, clamped to the sequence bounds.
#[must_use]
pub fn aggregate(current: &[RgbHistogram], mode: AveragingMode) -> Vec<RgbHistogram> {
    match mode {
        AveragingMode::Global => {
            let average = RgbHistogram::mean_of(current);
            vec![average; current.len()]
        }
        AveragingMode::Window { radius } => {
            let radius = radius.get();
            let last = current.len().saturating_sub(1);
            (0..current.len())
                .map(|i| {
                    let start = i.saturating_sub(radius);
                    let end = i.saturating_add(radius).min(last);
                    RgbHistogram::mean_of(&current[start..=end])
                })
                .collect()
        }
    }
}

/// Reads every picture's current histogram and writes its target.
pub fn assign_targets(pictures: &mut [Picture], mode: AveragingMode) {
    let current: Vec<RgbHistogram> = pictures.iter().map(|p| p.current.clone()).collect();
    for (picture, target) in pictures.iter_mut().zip(aggregate(&current, mode)) {
        picture.target = target;
    }
}
