//! Histogram extraction, aggregation, matching and LUT application.
//!
//! Data flows extractor -> aggregator -> synthesizer -> applicator; every
//! function here is pure and safe to call from any worker thread.

mod aggregate;
mod apply;
mod extract;
mod synthesize;

pub use aggregate::{aggregate, assign_targets};
pub use apply::apply_lut;
pub use extract::extract_histogram;
pub use synthesize::{match_channel, match_histograms};
