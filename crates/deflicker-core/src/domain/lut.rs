//! Intensity lookup tables.

use super::histogram::{Channel, LEVELS};

/// 256-entry remapping table for one channel, indexed by input intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLut {
    entries: [u8; LEVELS],
}

impl ChannelLut {
    /// The identity mapping.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn identity() -> Self {
        let mut entries = [0u8; LEVELS];
        for (level, entry) in entries.iter_mut().enumerate() {
            // level < 256
            *entry = level as u8;
        }
        Self { entries }
    }

    /// Creates a table from raw entries.
    #[must_use]
    pub const fn from_entries(entries: [u8; LEVELS]) -> Self {
        Self { entries }
    }

    /// Returns the table entries.
    #[must_use]
    pub const fn entries(&self) -> &[u8; LEVELS] {
        &self.entries
    }

    /// Maps one intensity.
    #[inline]
    #[must_use]
    pub const fn map(&self, level: u8) -> u8 {
        self.entries[level as usize]
    }

    /// Whether entries never decrease with increasing input.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| w[0] <= w[1])
    }
}

impl Default for ChannelLut {
    fn default() -> Self {
        Self::identity()
    }
}

/// One lookup table per RGB channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbLut {
    /// Red channel table.
    pub red: ChannelLut,
    /// Green channel table.
    pub green: ChannelLut,
    /// Blue channel table.
    pub blue: ChannelLut,
}

impl RgbLut {
    /// Returns the table of one channel.
    #[must_use]
    pub const fn channel(&self, channel: Channel) -> &ChannelLut {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Maps an RGB triple, channel by channel.
    #[inline]
    #[must_use]
    pub const fn map(&self, [r, g, b]: [u8; 3]) -> [u8; 3] {
        [self.red.map(r), self.green.map(g), self.blue.map(b)]
    }
}
