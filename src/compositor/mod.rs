//! Channel compositing.
//!
//! Each channel becomes a flat-colored layer whose alpha is the channel
//! intensity. Layers are blended in channel order over an opaque black
//! backdrop, so where stains overlap the later channel wins.

pub mod alpha;
pub mod layer;

use image::RgbaImage;
use ndarray::ArrayView3;
use tracing::debug;

use crate::channels::MultiChannelImage;
use crate::config::RenderOptions;
use crate::error::{Result, StainviewError};
use crate::logging::RenderTimer;
use crate::palette::{ColorTable, DEFAULT_TABLE};

pub use alpha::{blend_over, composite_over, opaque_backdrop};
pub use layer::{channel_alpha, ColorLayer, IntensityPolicy};

/// Composite every channel of `image` with default [`RenderOptions`].
///
/// `colors` defaults to [`DEFAULT_TABLE`] and must have at least one entry per
/// channel. An image without channels yields the bare black backdrop.
pub fn composite(image: &MultiChannelImage, colors: Option<&ColorTable>) -> Result<RgbaImage> {
    composite_with(image, colors, &RenderOptions::default())
}

/// Composite every channel of `image`, handling out-of-range intensities per
/// `options.intensity`. Spacing only affects montages and is ignored here.
pub fn composite_with(
    image: &MultiChannelImage,
    colors: Option<&ColorTable>,
    options: &RenderOptions,
) -> Result<RgbaImage> {
    let timer = RenderTimer::start(
        "composite",
        image.channel_count(),
        image.dimensions(),
        Some(options.intensity),
    );
    let table = colors.unwrap_or(&*DEFAULT_TABLE);
    timer.finish(composite_view(image.view(), table, options.intensity))
}

/// Composite a (C, H, W) view whose rows and cols have already been validated.
pub(crate) fn composite_view(
    channels: ArrayView3<'_, f32>,
    table: &ColorTable,
    policy: IntensityPolicy,
) -> Result<RgbaImage> {
    let (count, rows, cols) = channels.dim();
    table.ensure_covers(count)?;

    debug!(
        channels = count,
        rows = rows,
        cols = cols,
        policy = %policy,
        "Compositing channels"
    );

    let (width, height) = (to_extent(cols)?, to_extent(rows)?);
    let mut composite = opaque_backdrop(width, height);
    for (index, (plane, &color)) in channels.outer_iter().zip(table.colors()).enumerate() {
        let layer = ColorLayer::new(plane, index, color, policy)?;
        composite_over(&mut composite, layer.image())?;
    }

    Ok(composite)
}

fn to_extent(size: usize) -> Result<u32> {
    u32::try_from(size).map_err(|_| StainviewError::InvalidShape {
        message: format!("extent {size} exceeds the maximum image extent"),
    })
}
