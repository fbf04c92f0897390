//! Deflicker Core - histogram matching for image sequences
//!
//! This crate contains the domain types, the per-channel histogram matching
//! algorithms, the ports used to reach decoders, encoders and progress
//! displays, and the two-phase batch orchestrator that ties them together.

pub mod batch;
pub mod domain;
pub mod error;
pub mod matching;
pub mod ports;

pub use batch::{Batch, BatchState, BatchSummary, Phase};
pub use domain::{
    AveragingMode, BatchConfig, Channel, ChannelHistogram, ChannelLut, EncodeOptions,
    FrameReport, Picture, PngCompression, RgbHistogram, RgbLut, RowRange, SequenceEntry,
};
pub use error::{DeflickerError, Result};
pub use ports::{
    NoProgress, PixelSink, PixelSource, ProgressEvent, ProgressSink, ReportOutput, SequenceSource,
};
