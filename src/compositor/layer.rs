//! Flat-color channel layers.
//!
//! A layer paints one stain color over the whole image and takes its per-pixel
//! alpha from the channel intensity. Intensities are cast to 8 bits without
//! rescaling, so callers are expected to pre-scale them into [0, 255].

use image::{GrayImage, Rgba, RgbaImage};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{Result, StainviewError};
use crate::palette::Rgb;

/// What to do with intensities that do not fit in 8 bits.
///
/// In-range values are truncated toward zero in every policy, so anything
/// below 1.0 is fully transparent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityPolicy {
    /// Clamp into [0, 255] and log a warning. NaN becomes 0.
    #[default]
    Saturate,
    /// Truncate, then wrap modulo 256 like an unchecked integer cast. Logs a warning.
    Wrap,
    /// Fail with [`StainviewError::IntensityOutOfRange`].
    Reject,
}

impl IntensityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityPolicy::Saturate => "saturate",
            IntensityPolicy::Wrap => "wrap",
            IntensityPolicy::Reject => "reject",
        }
    }

    fn convert(&self, value: f32) -> u8 {
        match self {
            IntensityPolicy::Wrap if value.is_finite() => {
                (value.trunc() as i64).rem_euclid(256) as u8
            }
            // `as` saturates and maps NaN to 0
            _ => value as u8,
        }
    }
}

impl FromStr for IntensityPolicy {
    type Err = StainviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "saturate" => Ok(IntensityPolicy::Saturate),
            "wrap" => Ok(IntensityPolicy::Wrap),
            "reject" => Ok(IntensityPolicy::Reject),
            _ => Err(StainviewError::Config {
                message: format!(
                    "Invalid intensity policy: {}. Must be one of: saturate, wrap, reject",
                    s
                ),
            }),
        }
    }
}

impl fmt::Display for IntensityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when `value` does not survive truncation to `u8` unchanged.
#[inline]
fn out_of_range(value: f32) -> bool {
    !(value > -1.0 && value < 256.0)
}

/// Convert one channel plane into an 8-bit alpha mask.
pub fn channel_alpha(
    plane: ArrayView2<'_, f32>,
    channel: usize,
    policy: IntensityPolicy,
) -> Result<GrayImage> {
    let (rows, cols) = plane.dim();

    let mut first_bad = None;
    let mut bad_count = 0usize;
    for &value in plane.iter() {
        if out_of_range(value) {
            bad_count += 1;
            if first_bad.is_none() {
                first_bad = Some(value);
            }
        }
    }

    if let Some(value) = first_bad {
        if policy == IntensityPolicy::Reject {
            return Err(StainviewError::IntensityOutOfRange {
                channel,
                value,
                count: bad_count,
            });
        }
        warn!(
            channel = channel,
            count = bad_count,
            first_value = value,
            policy = %policy,
            "Channel intensities outside the 8-bit range"
        );
    }

    let alpha: Vec<u8> = plane.iter().map(|&value| policy.convert(value)).collect();
    GrayImage::from_raw(cols as u32, rows as u32, alpha).ok_or_else(|| {
        StainviewError::ImageGeneration {
            message: format!("alpha buffer does not fit a {cols}x{rows} image"),
        }
    })
}

/// A single stain rendered as flat color with intensity-driven alpha.
#[derive(Debug, Clone)]
pub struct ColorLayer {
    color: Rgb,
    image: RgbaImage,
}

impl ColorLayer {
    /// Build the layer for channel `channel`, painted in `color`.
    pub fn new(
        plane: ArrayView2<'_, f32>,
        channel: usize,
        color: Rgb,
        policy: IntensityPolicy,
    ) -> Result<Self> {
        let alpha = channel_alpha(plane, channel, policy)?;
        let [r, g, b] = color;
        let image = RgbaImage::from_fn(alpha.width(), alpha.height(), |x, y| {
            Rgba([r, g, b, alpha.get_pixel(x, y)[0]])
        });
        Ok(Self { color, image })
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_truncation() {
        let plane = array![[0.0f32, 0.99, 1.0, 254.7], [255.0, 255.9, 17.5, 3.2]];
        let alpha = channel_alpha(plane.view(), 0, IntensityPolicy::Saturate).unwrap();
        assert_eq!(alpha.dimensions(), (4, 2));
        assert_eq!(alpha.as_raw(), &vec![0, 0, 1, 254, 255, 255, 17, 3]);
    }

    #[test]
    fn test_saturate() {
        let plane = array![[300.0f32, -5.0, f32::NAN, f32::INFINITY]];
        let alpha = channel_alpha(plane.view(), 0, IntensityPolicy::Saturate).unwrap();
        assert_eq!(alpha.as_raw(), &vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_wrap() {
        let plane = array![[256.0f32, 300.4, 511.0, -1.0, f32::NAN]];
        let alpha = channel_alpha(plane.view(), 0, IntensityPolicy::Wrap).unwrap();
        assert_eq!(alpha.as_raw(), &vec![0, 44, 255, 255, 0]);
    }

    #[test]
    fn test_reject() {
        let plane = array![[1.0f32, 400.0], [500.0, 2.0]];
        let err = channel_alpha(plane.view(), 3, IntensityPolicy::Reject).unwrap_err();
        match err {
            StainviewError::IntensityOutOfRange {
                channel,
                value,
                count,
            } => {
                assert_eq!(channel, 3);
                assert_eq!(value, 400.0);
                assert_eq!(count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }

        let plane = array![[0.0f32, 255.5]];
        assert!(channel_alpha(plane.view(), 0, IntensityPolicy::Reject).is_ok());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("wrap".parse::<IntensityPolicy>().unwrap(), IntensityPolicy::Wrap);
        assert_eq!("REJECT".parse::<IntensityPolicy>().unwrap(), IntensityPolicy::Reject);
        assert!("clip".parse::<IntensityPolicy>().is_err());
        assert_eq!(IntensityPolicy::default().to_string(), "saturate");
    }

    #[test]
    fn test_color_layer() {
        let plane = array![[0.0f32, 128.0], [255.0, 64.0]];
        let layer =
            ColorLayer::new(plane.view(), 0, [255, 128, 0], IntensityPolicy::Saturate).unwrap();
        assert_eq!(layer.color(), [255, 128, 0]);
        assert_eq!(*layer.image().get_pixel(0, 0), Rgba([255, 128, 0, 0]));
        assert_eq!(*layer.image().get_pixel(1, 0), Rgba([255, 128, 0, 128]));
        assert_eq!(*layer.image().get_pixel(0, 1), Rgba([255, 128, 0, 255]));
        assert_eq!(*layer.image().get_pixel(1, 1), Rgba([255, 128, 0, 64]));
    }
}
