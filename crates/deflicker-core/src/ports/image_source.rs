//! Pixel source and sink ports.

use std::path::Path;

use image::DynamicImage;

use crate::domain::EncodeOptions;
use crate::error::Result;

/// Port for decoding images.
pub trait PixelSource: Send + Sync {
    /// Reads the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeflickerError::Decode`] if the image cannot be read.
    fn open(&self, path: &Path) -> Result<DynamicImage>;
}

/// Port for encoding and writing images.
pub trait PixelSink: Send + Sync {
    /// Writes `image` to `path` using the format-specific `options`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeflickerError::Encode`] if the image cannot be written.
    fn save(&self, image: &DynamicImage, path: &Path, options: &EncodeOptions) -> Result<()>;
}
