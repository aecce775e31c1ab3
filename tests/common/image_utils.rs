//! Image comparison utilities for testing.

use image::{Rgba, RgbaImage};

/// Maximum per-component difference for approximate comparison
pub const DEFAULT_PIXEL_DIFF: u8 = 1;

/// Compare two images for approximate equality
///
/// # Returns
///
/// * `Ok(())` if every component is within `max_diff` (default: 1)
/// * `Err(String)` describing the first mismatch otherwise
pub fn assert_images_approx_eq(
    actual: &RgbaImage,
    expected: &RgbaImage,
    max_diff: Option<u8>,
) -> Result<(), String> {
    if actual.dimensions() != expected.dimensions() {
        return Err(format!(
            "Image dimensions differ: actual = {:?}, expected = {:?}",
            actual.dimensions(),
            expected.dimensions()
        ));
    }

    let max_diff = max_diff.unwrap_or(DEFAULT_PIXEL_DIFF);
    for (x, y, actual_pixel) in actual.enumerate_pixels() {
        let expected_pixel = expected.get_pixel(x, y);
        for (a, e) in actual_pixel.0.iter().zip(expected_pixel.0.iter()) {
            if a.abs_diff(*e) > max_diff {
                return Err(format!(
                    "Pixel ({}, {}) differs: actual = {:?}, expected = {:?}",
                    x, y, actual_pixel.0, expected_pixel.0
                ));
            }
        }
    }

    Ok(())
}

/// Check that every pixel equals `expected`
pub fn assert_uniform(image: &RgbaImage, expected: Rgba<u8>) -> Result<(), String> {
    match image.enumerate_pixels().find(|(_, _, p)| **p != expected) {
        Some((x, y, p)) => Err(format!(
            "Pixel ({}, {}) is {:?}, expected {:?}",
            x, y, p.0, expected.0
        )),
        None => Ok(()),
    }
}

/// Count pixels equal to `color`
pub fn count_pixels(image: &RgbaImage, color: Rgba<u8>) -> usize {
    image.pixels().filter(|p| **p == color).count()
}

/// Copy out the `(x, y, width, height)` region of `image`
pub fn crop(image: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> RgbaImage {
    image::imageops::crop_imm(image, x, y, width, height).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_images_approx_eq() {
        let img1 = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 255]));
        let mut img2 = img1.clone();
        img2.put_pixel(1, 1, Rgba([11, 20, 30, 255]));

        assert!(assert_images_approx_eq(&img1, &img2, None).is_ok());
        assert!(assert_images_approx_eq(&img1, &img2, Some(0)).is_err());
        assert!(assert_images_approx_eq(&img1, &RgbaImage::new(2, 3), None).is_err());
    }
}
