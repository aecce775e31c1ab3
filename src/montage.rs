//! Per-channel montages.
//!
//! A montage lays each channel out as its own single-stain composite in a
//! two-column grid. Grid cells are filled in row-major order; when the channel
//! count is odd the last cell holds a blank black panel.

use image::{imageops, DynamicImage, GrayImage, RgbaImage};
use ndarray::s;

use crate::channels::MultiChannelImage;
use crate::compositor::{composite_view, opaque_backdrop};
use crate::config::RenderOptions;
use crate::error::{Result, StainviewError};
use crate::logging::RenderTimer;
use crate::palette::{ColorTable, Rgb, DEFAULT_TABLE};

/// Number of grid columns
pub const MONTAGE_COLUMNS: usize = 2;

/// Nominal panel edge length when the grid is shown as a figure, in inches
const PANEL_INCHES: f32 = 6.0;
/// Trimmed off each figure dimension so panels sit flush
const FIGURE_TRIM_INCHES: f32 = 0.6;

/// Grid rows for `channels` channels: `channels / 2` rounded half up.
pub fn montage_rows(channels: usize) -> usize {
    (channels + 1) / MONTAGE_COLUMNS
}

/// One grid cell.
#[derive(Debug, Clone)]
pub enum MontageCell {
    /// Composite of a single channel in its own color
    Channel {
        index: usize,
        color: Rgb,
        image: RgbaImage,
    },
    /// Filler for grid positions past the last channel
    Blank { image: GrayImage },
}

impl MontageCell {
    pub fn is_blank(&self) -> bool {
        matches!(self, MontageCell::Blank { .. })
    }

    /// Channel shown in this cell, if any
    pub fn channel_index(&self) -> Option<usize> {
        match self {
            MontageCell::Channel { index, .. } => Some(*index),
            MontageCell::Blank { .. } => None,
        }
    }

    /// The cell as displayed: blank panels become opaque black.
    pub fn to_rgba(&self) -> RgbaImage {
        match self {
            MontageCell::Channel { image, .. } => image.clone(),
            MontageCell::Blank { image } => DynamicImage::ImageLuma8(image.clone()).to_rgba8(),
        }
    }
}

/// A rows x 2 grid of per-channel panels.
#[derive(Debug, Clone)]
pub struct Montage {
    rows: usize,
    panel_width: u32,
    panel_height: u32,
    spacing: u32,
    cells: Vec<MontageCell>,
}

impl Montage {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        MONTAGE_COLUMNS
    }

    /// Size of each panel in pixels (width, height)
    pub fn panel_dimensions(&self) -> (u32, u32) {
        (self.panel_width, self.panel_height)
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[MontageCell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&MontageCell> {
        if col >= MONTAGE_COLUMNS {
            return None;
        }
        self.cells.get(row * MONTAGE_COLUMNS + col)
    }

    pub fn populated_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_blank()).count()
    }

    pub fn blank_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_blank()).count()
    }

    /// Figure size in inches, `(width, height)`, for display surfaces that want one.
    pub fn figure_size(&self) -> (f32, f32) {
        (
            PANEL_INCHES * MONTAGE_COLUMNS as f32 - FIGURE_TRIM_INCHES,
            PANEL_INCHES * self.rows as f32 - FIGURE_TRIM_INCHES,
        )
    }

    /// Size of the rendered grid in pixels (width, height)
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let span = |count: usize, panel: u32| -> Result<u32> {
            let count = count as u64;
            let total =
                count * u64::from(panel) + count.saturating_sub(1) * u64::from(self.spacing);
            u32::try_from(total).map_err(|_| StainviewError::ImageGeneration {
                message: format!("montage extent {total} exceeds the maximum image extent"),
            })
        };
        Ok((
            span(MONTAGE_COLUMNS, self.panel_width)?,
            span(self.rows, self.panel_height)?,
        ))
    }

    /// Paste every panel into one image. Gaps between panels are black.
    pub fn render(&self) -> Result<RgbaImage> {
        let (width, height) = self.dimensions()?;
        let mut canvas = opaque_backdrop(width, height);

        for (position, cell) in self.cells.iter().enumerate() {
            let row = (position / MONTAGE_COLUMNS) as i64;
            let col = (position % MONTAGE_COLUMNS) as i64;
            let x = col * i64::from(self.panel_width + self.spacing);
            let y = row * i64::from(self.panel_height + self.spacing);
            imageops::replace(&mut canvas, &cell.to_rgba(), x, y);
        }

        Ok(canvas)
    }
}

/// Build a montage of `image` with default [`RenderOptions`].
pub fn montage(image: &MultiChannelImage, colors: Option<&ColorTable>) -> Result<Montage> {
    montage_with(image, colors, &RenderOptions::default())
}

/// Build a montage of `image`.
///
/// Fails with [`StainviewError::InvalidShape`] when the image has no channels,
/// since there is nothing to lay out, and with [`StainviewError::Config`] when
/// `options.spacing` exceeds [`MAX_SPACING`](crate::config::MAX_SPACING).
pub fn montage_with(
    image: &MultiChannelImage,
    colors: Option<&ColorTable>,
    options: &RenderOptions,
) -> Result<Montage> {
    let timer = RenderTimer::start(
        "montage",
        image.channel_count(),
        image.dimensions(),
        Some(options.intensity),
    );
    timer.finish(build_montage(
        image,
        colors.unwrap_or(&*DEFAULT_TABLE),
        options,
    ))
}

fn build_montage(
    image: &MultiChannelImage,
    table: &ColorTable,
    options: &RenderOptions,
) -> Result<Montage> {
    let channels = image.channel_count();
    if channels == 0 {
        return Err(StainviewError::InvalidShape {
            message: "a montage needs at least one channel".to_string(),
        });
    }
    table.ensure_covers(channels)?;
    options.validate()?;

    let rows = montage_rows(channels);
    let (panel_width, panel_height) = image.dimensions();
    let view = image.view();

    let mut cells = Vec::with_capacity(rows * MONTAGE_COLUMNS);
    let mut k = 0;
    for _row in 0..rows {
        for _col in 0..MONTAGE_COLUMNS {
            let cell = if k >= channels {
                MontageCell::Blank {
                    image: GrayImage::new(panel_width, panel_height),
                }
            } else {
                let single = table
                    .single(k)
                    .ok_or(StainviewError::ChannelCountExceedsTable {
                        channels,
                        table_len: table.len(),
                    })?;
                let composite =
                    composite_view(view.slice(s![k..k + 1, .., ..]), &single, options.intensity)?;
                MontageCell::Channel {
                    index: k,
                    color: single.colors()[0],
                    image: composite,
                }
            };
            cells.push(cell);
            k += 1;
        }
    }

    Ok(Montage {
        rows,
        panel_width,
        panel_height,
        spacing: options.spacing,
        cells,
    })
}
