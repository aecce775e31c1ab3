//! The "over" operator for non-premultiplied RGBA.
//!
//! Arithmetic is fixed-point with the same rounding as PIL's
//! `alpha_composite`, so results match it bit for bit.

use image::{Rgba, RgbaImage};

use crate::error::{Result, StainviewError};

const PRECISION_BITS: u32 = 7;

/// Approximate `a / 255` for the ranges used below.
#[inline]
fn shift_for_div255(a: u32) -> u32 {
    ((a >> 8) + a) >> 8
}

/// Blend `src` over `dst`.
///
/// A fully transparent `src` returns `dst` untouched.
#[inline]
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let src_a = u32::from(src[3]);
    if src_a == 0 {
        return dst;
    }

    let blend = u32::from(dst[3]) * (255 - src_a);
    let out_a255 = src_a * 255 + blend;
    // Fits in u32: at most 255^3 * 2^7.
    let coef1 = src_a * 255 * 255 * (1 << PRECISION_BITS) / out_a255;
    let coef2 = 255 * (1 << PRECISION_BITS) - coef1;

    let mix = |s: u8, d: u8| -> u8 {
        let tmp = u32::from(s) * coef1 + u32::from(d) * coef2;
        (shift_for_div255(tmp + (0x80 << PRECISION_BITS)) >> PRECISION_BITS) as u8
    };

    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        shift_for_div255(out_a255 + 0x80) as u8,
    ])
}

/// Blend `layer` over `base` in place. Both images must be the same size.
pub fn composite_over(base: &mut RgbaImage, layer: &RgbaImage) -> Result<()> {
    if base.dimensions() != layer.dimensions() {
        return Err(StainviewError::ImageGeneration {
            message: format!(
                "layer is {:?} but the base image is {:?}",
                layer.dimensions(),
                base.dimensions()
            ),
        });
    }

    for (dst, src) in base.pixels_mut().zip(layer.pixels()) {
        *dst = blend_over(*dst, *src);
    }
    Ok(())
}

/// An opaque black image of the given size.
pub fn opaque_backdrop(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
}
