//! In-memory encoding of rendered images.

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use tracing::debug;

use crate::error::{Result, StainviewError};
use crate::logging::RenderTimer;

/// Encode `image` as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let timer = RenderTimer::start("encode_png", 4, image.dimensions(), None);
    timer.finish(write_png(image))
}

fn write_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| StainviewError::ImageGeneration {
            message: format!("Failed to encode PNG: {}", e),
        })?;

    let bytes = buffer.into_inner();
    debug!(bytes = bytes.len(), "PNG encoded");
    Ok(bytes)
}
