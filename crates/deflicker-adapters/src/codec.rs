//! Filesystem adapter for decoding and encoding frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use deflicker_core::{
    DeflickerError, EncodeOptions, PixelSink, PixelSource, PngCompression, Result,
};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageError, ImageFormat};
use tracing::debug;

/// Reads frames with `image::open` and writes them with per-format options.
///
/// The output format follows the destination extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPixelStore;

impl FsPixelStore {
    /// Creates a new store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PixelSource for FsPixelStore {
    fn open(&self, path: &Path) -> Result<DynamicImage> {
        image::open(path).map_err(|source| DeflickerError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl PixelSink for FsPixelStore {
    fn save(&self, image: &DynamicImage, path: &Path, options: &EncodeOptions) -> Result<()> {
        encode(image, path, options).map_err(|source| DeflickerError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Encoded {}", path.display());
        Ok(())
    }
}

const fn png_compression(compression: PngCompression) -> CompressionType {
    match compression {
        PngCompression::Fast => CompressionType::Fast,
        PngCompression::Default => CompressionType::Default,
        PngCompression::Best => CompressionType::Best,
    }
}

fn encode(
    image: &DynamicImage,
    path: &Path,
    options: &EncodeOptions,
) -> std::result::Result<(), ImageError> {
    let format = ImageFormat::from_path(path)?;
    match format {
        ImageFormat::Jpeg => {
            let mut writer = BufWriter::new(File::create(path)?);
            let encoder = JpegEncoder::new_with_quality(&mut writer, options.jpeg_quality);
            // JPEG has no alpha channel
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
            writer.flush()?;
        }
        ImageFormat::Png => {
            let mut writer = BufWriter::new(File::create(path)?);
            let encoder = PngEncoder::new_with_quality(
                &mut writer,
                png_compression(options.png_compression),
                FilterType::Adaptive,
            );
            image.write_with_encoder(encoder)?;
            writer.flush()?;
        }
        other => image.save_with_format(path, other)?,
    }
    Ok(())
}
