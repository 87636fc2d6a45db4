//! Turns a drawn digit into a network input vector.
//!
//! The image is resized to the MNIST grid, converted to grayscale and scaled
//! the same way as the training pixels.

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::data::mnist::normalize_pixel;
use crate::error::Result;

/// Side length of an MNIST image.
pub const MNIST_SIDE: u32 = 28;

/// Grayscale input of `side × side` pixels in row-major order.
///
/// With `invert`, dark strokes on a light background are flipped to the
/// light-on-dark convention MNIST uses.
pub fn image_to_input(img: &DynamicImage, side: u32, invert: bool) -> Vec<f64> {
    let resized = img.resize_exact(side, side, FilterType::Lanczos3);
    let gray = resized.to_luma8();
    gray.pixels()
        .map(|p| {
            let value = if invert { 255 - p.0[0] } else { p.0[0] };
            normalize_pixel(value)
        })
        .collect()
}

pub fn image_bytes_to_input(bytes: &[u8], side: u32, invert: bool) -> Result<Vec<f64>> {
    let img = image::load_from_memory(bytes)?;
    Ok(image_to_input(&img, side, invert))
}

pub fn image_file_to_input(path: impl AsRef<Path>, side: u32, invert: bool) -> Result<Vec<f64>> {
    let img = image::open(path)?;
    Ok(image_to_input(&img, side, invert))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn blank(side: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(side, side, Luma([value])))
    }

    #[test]
    fn output_has_one_value_per_grid_pixel() {
        let input = image_to_input(&blank(56, 0), MNIST_SIDE, false);
        assert_eq!(input.len(), 784);
        assert!(input.iter().all(|&v| v == 0.01));
    }

    #[test]
    fn invert_flips_white_background_to_black() {
        let input = image_to_input(&blank(28, 255), MNIST_SIDE, true);
        assert!(input.iter().all(|&v| v == 0.01));
    }

    #[test]
    fn reads_bmp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FreeHand.bmp");
        blank(28, 255).save(&path).unwrap();

        let input = image_file_to_input(&path, MNIST_SIDE, false).unwrap();
        assert_eq!(input.len(), 784);
        assert!(input.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let err = image_bytes_to_input(b"not an image", MNIST_SIDE, false).unwrap_err();
        assert!(matches!(err, crate::error::Error::Image(_)));
    }
}
