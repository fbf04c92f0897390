//! Per-channel intensity histograms.

use std::fmt;

/// Number of 8-bit intensity levels.
pub const LEVELS: usize = 256;

/// A color channel of an RGB image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
}

impl Channel {
    /// All channels in RGB order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        })
    }
}

/// 256-bin histogram of a single channel, indexed by intensity.
#[derive(Clone, PartialEq, Eq)]
pub struct ChannelHistogram {
    bins: [u64; LEVELS],
}

impl ChannelHistogram {
    /// Creates an empty histogram.
    #[must_use]
    pub const fn new() -> Self {
        Self { bins: [0; LEVELS] }
    }

    /// Creates a histogram from raw bin counts.
    #[must_use]
    pub const fn from_bins(bins: [u64; LEVELS]) -> Self {
        Self { bins }
    }

    /// Returns the bin counts.
    #[must_use]
    pub const fn bins(&self) -> &[u64; LEVELS] {
        &self.bins
    }

    /// Counts one sample at `level`.
    #[inline]
    pub fn record(&mut self, level: u8) {
        self.bins[usize::from(level)] += 1;
    }

    /// Total number of samples.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Running-sum form: `out[i] = in[0] + ... + in[i]`.
    #[must_use]
    pub fn cumulative(&self) -> Self {
        let mut out = [0u64; LEVELS];
        let mut running = 0u64;
        for (slot, &count) in out.iter_mut().zip(self.bins.iter()) {
            running += count;
            *slot = running;
        }
        Self { bins: out }
    }

    /// Mean intensity, or 0.0 for an empty histogram.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(level, &count)| level as u64 * count)
            .sum();
        sum as f64 / total as f64
    }

    /// Bucket-wise truncating mean of `histograms`.
    ///
    /// Returns an empty histogram when `histograms` is empty.
    #[must_use]
    pub fn mean_of<'a, I>(histograms: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut sums = [0u64; LEVELS];
        let mut count = 0u64;
        for histogram in histograms {
            for (sum, &bin) in sums.iter_mut().zip(histogram.bins.iter()) {
                *sum += bin;
            }
            count += 1;
        }
        if count > 0 {
            for sum in &mut sums {
                *sum /= count;
            }
        }
        Self { bins: sums }
    }
}

impl Default for ChannelHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChannelHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Non-empty bins only.
        f.debug_map()
            .entries(self.bins.iter().enumerate().filter(|&(_, &count)| count > 0))
            .finish()
    }
}

/// Three independent channel histograms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RgbHistogram {
    /// Red channel.
    pub red: ChannelHistogram,
    /// Green channel.
    pub green: ChannelHistogram,
    /// Blue channel.
    pub blue: ChannelHistogram,
}

impl RgbHistogram {
    /// Creates an empty RGB histogram.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            red: ChannelHistogram::new(),
            green: ChannelHistogram::new(),
            blue: ChannelHistogram::new(),
        }
    }

    /// Returns the histogram of one channel.
    #[must_use]
    pub const fn channel(&self, channel: Channel) -> &ChannelHistogram {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Counts one RGB sample.
    #[inline]
    pub fn record(&mut self, [r, g, b]: [u8; 3]) {
        self.red.record(r);
        self.green.record(g);
        self.blue.record(b);
    }

    /// Number of sampled pixels.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.red.total()
    }

    /// Per-channel cumulative form.
    #[must_use]
    pub fn cumulative(&self) -> Self {
        Self {
            red: self.red.cumulative(),
            green: self.green.cumulative(),
            blue: self.blue.cumulative(),
        }
    }

    /// Per-channel mean intensity in RGB order.
    #[must_use]
    pub fn means(&self) -> [f64; 3] {
        [self.red.mean(), self.green.mean(), self.blue.mean()]
    }

    /// Bucket-wise truncating mean over a slice of RGB histograms.
    #[must_use]
    pub fn mean_of(histograms: &[Self]) -> Self {
        Self {
            red: ChannelHistogram::mean_of(histograms.iter().map(|h| &h.red)),
            green: ChannelHistogram::mean_of(histograms.iter().map(|h| &h.green)),
            blue: ChannelHistogram::mean_of(histograms.iter().map(|h| &h.blue)),
        }
    }
}
