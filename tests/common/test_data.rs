//! Test data generation utilities.
//!
//! Builds small synthetic stain stacks with known layouts.

use ndarray::Array3;
use stainview::MultiChannelImage;

/// A stack where every channel is `value` everywhere.
pub fn uniform_stack(channels: usize, rows: usize, cols: usize, value: f32) -> MultiChannelImage {
    MultiChannelImage::new(Array3::from_elem((channels, rows, cols), value))
        .expect("uniform stack has a valid shape")
}

/// One channel per stripe: channel `c` is 255 in columns `c * width .. (c + 1) * width`
/// and 0 elsewhere, so the stains never overlap.
pub fn striped_stack(channels: usize, rows: usize, stripe_width: usize) -> MultiChannelImage {
    let cols = (channels * stripe_width).max(1);
    let data = Array3::from_shape_fn((channels, rows, cols), |(c, _, x)| {
        if x / stripe_width == c {
            255.0
        } else {
            0.0
        }
    });
    MultiChannelImage::new(data).expect("striped stack has a valid shape")
}

/// A single channel ramping 0, 1, 2, ... along each row.
pub fn horizontal_ramp(cols: usize) -> MultiChannelImage {
    let data = Array3::from_shape_fn((1, 2, cols), |(_, _, x)| x as f32);
    MultiChannelImage::new(data).expect("ramp has a valid shape")
}

/// A "nucleus" disc in channel 0 and a surrounding "membrane" ring in channel 1.
pub fn nucleus_and_membrane(size: usize) -> MultiChannelImage {
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 4.0;
    let data = Array3::from_shape_fn((2, size, size), |(c, y, x)| {
        let d = ((x as f32 - center).powi(2) + (y as f32 - center).powi(2)).sqrt();
        match c {
            0 if d <= radius => 255.0,
            1 if d > radius && d <= radius * 1.5 => 180.0,
            _ => 0.0,
        }
    });
    MultiChannelImage::new(data).expect("cell image has a valid shape")
}
