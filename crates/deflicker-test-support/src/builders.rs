//! Synthetic frame builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

/// Builder for creating synthetic timelapse frames.
///
/// Provides convenience methods for generating frames with known tonal
/// content (uniform, gradients, flickering sequences).
pub struct SyntheticFrameBuilder;

impl SyntheticFrameBuilder {
    // === Uniform Frames ===

    /// Creates a frame where every pixel is `(r, g, b)`.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([r, g, b])))
    }

    /// Creates a uniform gray frame.
    #[must_use]
    pub fn gray(width: u32, height: u32, value: u8) -> DynamicImage {
        Self::rgb_uniform(width, height, value, value, value)
    }

    /// Creates a single-channel grayscale frame.
    #[must_use]
    pub fn luma(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    /// Creates a uniform frame with an alpha channel.
    #[must_use]
    pub fn rgba_uniform(width: u32, height: u32, rgb: [u8; 3], alpha: u8) -> DynamicImage {
        let [r, g, b] = rgb;
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([r, g, b, alpha])))
    }

    // === Gradients ===

    /// Creates a horizontal gray ramp from `low` to `high`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32, low: u8, high: u8) -> DynamicImage {
        let span = u32::from(high.saturating_sub(low));
        let img = RgbImage::from_fn(width, height, |x, _| {
            let v = low + ((span * x) / width.saturating_sub(1).max(1)) as u8;
            Rgb([v, v, v])
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Creates a frame whose rows carry distinct levels: row `y` is `base + y`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn row_bands(width: u32, height: u32, base: u8) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |_, y| {
            let v = base.wrapping_add(y as u8);
            Rgb([v, v, v])
        });
        DynamicImage::ImageRgb8(img)
    }

    // === Sequences ===

    /// Creates a flickering sequence: the same gradient shifted by each offset.
    ///
    /// Useful for checking that adjustment pulls frame brightness together.
    #[must_use]
    pub fn flicker_sequence(width: u32, height: u32, offsets: &[i16]) -> Vec<DynamicImage> {
        offsets
            .iter()
            .map(|&offset| {
                let img = RgbImage::from_fn(width, height, |x, _| {
                    let base = i32::try_from(x * 100 / width.max(1)).unwrap_or(0) + 60;
                    let v = u8::try_from((base + i32::from(offset)).clamp(0, 255)).unwrap_or(0);
                    Rgb([v, v, v])
                });
                DynamicImage::ImageRgb8(img)
            })
            .collect()
    }
}

/// Mean of every RGB sample, used to compare frame brightness in tests.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_intensity(image: &DynamicImage) -> f64 {
    let rgb = image.to_rgb8();
    let samples = rgb.as_raw();
    if samples.is_empty() {
        return 0.0;
    }
    let sum: u64 = samples.iter().map(|&v| u64::from(v)).sum();
    sum as f64 / samples.len() as f64
}
