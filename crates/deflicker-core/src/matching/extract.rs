//! Histogram extraction from decoded images.

use image::{DynamicImage, ImageBuffer, Pixel};

use crate::domain::{RgbHistogram, RowRange};
use crate::error::Result;

/// Counts the RGB levels of every pixel in `rows`, across the full width.
///
/// Alpha is ignored. Images with more than 8 bits per channel are reduced
/// to 8 bits first.
///
/// # Errors
///
/// Returns [`crate::DeflickerError::InvalidRange`] if `rows` does not fit
/// inside the image or is empty.
pub fn extract_histogram(image: &DynamicImage, rows: RowRange) -> Result<RgbHistogram> {
    let range = rows.resolve(image.height())?;
    let skip = range.start as usize;
    let take = range.len();

    let histogram = match image {
        DynamicImage::ImageRgb8(buffer) => accumulate(buffer, skip, take),
        DynamicImage::ImageRgba8(buffer) => accumulate(buffer, skip, take),
        other => accumulate(&other.to_rgb8(), skip, take),
    };
    Ok(histogram)
}

fn accumulate<P>(buffer: &ImageBuffer<P, Vec<u8>>, skip: usize, take: usize) -> RgbHistogram
where
    P: Pixel<Subpixel = u8>,
{
    let mut histogram = RgbHistogram::new();
    for pixel in buffer.rows().skip(skip).take(take).flatten() {
        histogram.record(pixel.to_rgb().0);
    }
    histogram
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::Channel;
    use crate::DeflickerError;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        #[allow(clippy::cast_possible_truncation)]
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_counts_sum_to_sampled_pixels() {
        let img = gradient(37, 23);
        let hist = extract_histogram(&img, RowRange::FULL).unwrap();
        for channel in Channel::ALL {
            assert_eq!(hist.channel(channel).total(), 37 * 23);
        }
    }

    #[test]
    fn test_row_subrange_counts() {
        let img = gradient(16, 10);
        let hist = extract_histogram(&img, RowRange::new(2, Some(5))).unwrap();
        assert_eq!(hist.total(), 3 * 16);
        // Green carries the row index.
        assert_eq!(hist.green.bins()[2], 16);
        assert_eq!(hist.green.bins()[4], 16);
        assert_eq!(hist.green.bins()[5], 0);
        assert_eq!(hist.green.bins()[1], 0);
    }

    #[test]
    fn test_open_stop_uses_full_height() {
        let img = gradient(4, 6);
        let hist = extract_histogram(&img, RowRange::new(0, None)).unwrap();
        assert_eq!(hist.total(), 24);
    }

    #[test]
    fn test_equal_start_and_stop_is_invalid() {
        let img = gradient(4, 6);
        let err = extract_histogram(&img, RowRange::new(3, Some(3))).unwrap_err();
        assert!(matches!(err, DeflickerError::InvalidRange { .. }));
    }

    #[test]
    fn test_stop_past_bottom_is_invalid() {
        let img = gradient(4, 6);
        let err = extract_histogram(&img, RowRange::new(0, Some(7))).unwrap_err();
        assert!(matches!(err, DeflickerError::InvalidRange { height: Some(6), .. }));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let img = RgbaImage::from_fn(3, 3, |x, _| {
            Rgba([10, 20, 30, if x == 0 { 0 } else { 255 }])
        });
        let hist = extract_histogram(&DynamicImage::ImageRgba8(img), RowRange::FULL).unwrap();
        assert_eq!(hist.red.bins()[10], 9);
        assert_eq!(hist.green.bins()[20], 9);
        assert_eq!(hist.blue.bins()[30], 9);
    }

    #[test]
    fn test_grayscale_counts_in_every_channel() {
        let img = GrayImage::from_fn(5, 2, |_, _| Luma([77]));
        let hist = extract_histogram(&DynamicImage::ImageLuma8(img), RowRange::FULL).unwrap();
        for channel in Channel::ALL {
            assert_eq!(hist.channel(channel).bins()[77], 10);
        }
    }
}
