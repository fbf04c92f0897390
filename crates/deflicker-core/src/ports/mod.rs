//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod image_source;
mod progress;
mod result_output;
mod sequence;

pub use image_source::{PixelSink, PixelSource};
pub use progress::{NoProgress, ProgressEvent, ProgressSink};
pub use result_output::ReportOutput;
pub use sequence::SequenceSource;
