//! LUT application.

use image::DynamicImage;

use crate::domain::RgbLut;

/// Returns a copy of `image` with every RGB value passed through `lut`.
///
/// Alpha is carried over unchanged. The result is 8-bit RGB, or 8-bit RGBA
/// when the source has an alpha channel.
#[must_use]
pub fn apply_lut(image: &DynamicImage, lut: &RgbLut) -> DynamicImage {
    if image.color().has_alpha() {
        let mut buffer = image.to_rgba8();
        for pixel in buffer.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let [r, g, b] = lut.map([r, g, b]);
            pixel.0 = [r, g, b, a];
        }
        DynamicImage::ImageRgba8(buffer)
    } else {
        let mut buffer = image.to_rgb8();
        for pixel in buffer.pixels_mut() {
            pixel.0 = lut.map(pixel.0);
        }
        DynamicImage::ImageRgb8(buffer)
    }
}
