//! Deflicker Adapters - Filesystem adapters for deflicker.
//!
//! This crate provides adapters for:
//! - Enumerating a directory of frames in sequence order
//! - Decoding frames and encoding adjusted frames with format options

pub mod codec;
pub mod fs;

pub use codec::FsPixelStore;
pub use fs::FsSequenceSource;
