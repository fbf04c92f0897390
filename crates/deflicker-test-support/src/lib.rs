//! Test support utilities for deflicker.
//!
//! Provides mocks, synthetic frame builders, and utilities for testing
//! the deflicker pipeline.
//!
//! # Example
//!
//! ```
//! use deflicker_test_support::{MemoryImageStore, SyntheticFrameBuilder};
//!
//! // A dark and a bright frame of the same scene
//! let dark = SyntheticFrameBuilder::gray(16, 16, 40);
//! let bright = SyntheticFrameBuilder::gray(16, 16, 80);
//!
//! // Serve them from memory
//! let store = MemoryImageStore::new()
//!     .with_image("frame_0000.png", dark)
//!     .with_image("frame_0001.png", bright);
//! ```

mod builders;
mod mocks;

pub use builders::{mean_intensity, SyntheticFrameBuilder};
pub use mocks::{MemoryImageStore, MockProgressSink, MockReportOutput, MockSequence};
