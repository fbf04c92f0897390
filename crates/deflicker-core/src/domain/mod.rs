//! Core domain types for histogram-matching deflicker.

mod config;
mod histogram;
mod lut;
mod picture;
mod report;

pub use config::{AveragingMode, BatchConfig, EncodeOptions, PngCompression, RowRange};
pub use histogram::{Channel, ChannelHistogram, RgbHistogram, LEVELS};
pub use lut::{ChannelLut, RgbLut};
pub use picture::{Picture, SequenceEntry};
pub use report::FrameReport;
