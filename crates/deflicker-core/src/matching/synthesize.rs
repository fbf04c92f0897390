//! LUT synthesis by histogram specification.
//!
//! The current and target histograms are turned into cumulative form, the
//! target is rescaled to the current pixel count, and a single forward pointer
//! walk finds, for every input level, the first target level whose cumulative
//! count reaches the input's. Because both cumulative arrays are
//! non-decreasing the pointer never moves back, so the table is monotonic.

use crate::domain::{Channel, ChannelHistogram, ChannelLut, RgbHistogram, RgbLut, LEVELS};
use crate::error::{DeflickerError, Result};

/// Builds the table mapping `current`'s distribution onto `target`'s.
///
/// # Errors
///
/// Returns [`DeflickerError::EmptyTarget`] if `target` holds no samples.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn match_channel(
    current: &ChannelHistogram,
    target: &ChannelHistogram,
    channel: Channel,
) -> Result<ChannelLut> {
    let current_cum = current.cumulative();
    let target_cum = target.cumulative();

    let target_total = target_cum.bins()[LEVELS - 1];
    if target_total == 0 {
        return Err(DeflickerError::EmptyTarget { channel });
    }
    let ratio = current_cum.bins()[LEVELS - 1] as f64 / target_total as f64;

    // Round half up onto the current image's pixel-count scale.
    let scaled = target_cum
        .bins()
        .map(|count| (count as f64 * ratio + 0.5).floor() as u64);

    let mut entries = [0u8; LEVELS];
    let mut p = 0usize;
    for (entry, &wanted) in entries.iter_mut().zip(current_cum.bins().iter()) {
        // Rounding can leave the top of `scaled` just below `wanted`; stop at 255.
        while p < LEVELS - 1 && scaled[p] < wanted {
            p += 1;
        }
        *entry = p as u8;
    }

    Ok(ChannelLut::from_entries(entries))
}

/// Builds one table per channel, see [`match_channel`].
///
/// # Errors
///
/// Returns [`DeflickerError::EmptyTarget`] naming the first channel whose
/// target histogram is empty.
pub fn match_histograms(current: &RgbHistogram, target: &RgbHistogram) -> Result<RgbLut> {
    Ok(RgbLut {
        red: match_channel(&current.red, &target.red, Channel::Red)?,
        green: match_channel(&current.green, &target.green, Channel::Green)?,
        blue: match_channel(&current.blue, &target.blue, Channel::Blue)?,
    })
}
