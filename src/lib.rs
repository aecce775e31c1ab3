//! # stainview
//!
//! Human-viewable renderings of multi-channel fluorescence microscopy images.
//!
//! Each channel holds the signal of one stain. This library turns such a
//! stack into either a single composite, where every stain is drawn in its own
//! color with intensity as transparency, or a montage that shows each stain on
//! its own panel.
//!
//! ## Key Features
//!
//! - **Composite**: channels blended in order over an opaque black backdrop
//! - **Montage**: two-column grid of single-stain composites
//! - **Color tables**: a built-in seven-stain palette or a caller-supplied one
//! - **Explicit failures**: shape, palette and intensity problems are reported
//!   as errors instead of silently producing garbage
//!
//! ## Example
//!
//! ```
//! use ndarray::Array3;
//! use stainview::{composite, montage, MultiChannelImage};
//!
//! let image = MultiChannelImage::new(Array3::from_elem((3, 8, 8), 200.0)).unwrap();
//! let overlay = composite(&image, None).unwrap();
//! assert_eq!(overlay.dimensions(), (8, 8));
//!
//! let grid = montage(&image, None).unwrap();
//! assert_eq!(grid.rows(), 2);
//! assert_eq!(grid.blank_count(), 1);
//! ```

pub mod channels;
pub mod compositor;
pub mod config;
pub mod error;
pub mod logging;
pub mod montage;
pub mod palette;
pub mod render;

pub use channels::MultiChannelImage;
pub use compositor::{composite, composite_with, IntensityPolicy};
pub use config::{Config, RenderOptions};
pub use error::{Result, StainviewError};
pub use logging::{init_tracing, RenderTimer};
pub use montage::{montage, montage_with, Montage, MontageCell};
pub use palette::{ColorTable, Rgb, DEFAULT_COLORS};
pub use render::encode_png;
