//! Multi-channel intensity images.
//!
//! A [`MultiChannelImage`] is a (channels, rows, cols) array of `f32`
//! intensities, one plane per fluorescent stain. Construction validates the
//! shape once so the rendering code can rely on it.

use ndarray::{Array3, ArrayD, ArrayView2, ArrayView3, Axis, Ix3};

use crate::error::{Result, StainviewError};

/// A validated (C, H, W) stack of channel intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiChannelImage {
    data: Array3<f32>,
}

impl MultiChannelImage {
    /// Wrap a (C, H, W) array.
    ///
    /// Rows and columns must be non-zero and fit in `u32`. Zero channels are
    /// allowed; such an image composites to the bare backdrop.
    pub fn new(data: Array3<f32>) -> Result<Self> {
        let (_, rows, cols) = data.dim();
        check_extent("rows", rows)?;
        check_extent("cols", cols)?;
        Ok(Self { data })
    }

    /// Build an image from a flat row-major buffer.
    pub fn from_shape_vec(shape: (usize, usize, usize), values: Vec<f32>) -> Result<Self> {
        let data =
            Array3::from_shape_vec(shape, values).map_err(|e| StainviewError::InvalidShape {
                message: format!("buffer does not match shape {:?}: {}", shape, e),
            })?;
        Self::new(data)
    }

    /// Build an image from a dynamically-dimensioned array, which must be 3-D.
    pub fn from_dyn(data: ArrayD<f32>) -> Result<Self> {
        let ndim = data.ndim();
        let data = data
            .into_dimensionality::<Ix3>()
            .map_err(|_| StainviewError::InvalidShape {
                message: format!(
                    "expected a 3-dimensional (channels, rows, cols) array, got {ndim} dimensions"
                ),
            })?;
        Self::new(data)
    }

    /// An image with every channel at zero intensity.
    pub fn zeros(channels: usize, rows: usize, cols: usize) -> Result<Self> {
        Self::new(Array3::zeros((channels, rows, cols)))
    }

    pub fn channel_count(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn rows(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn cols(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Width and height in pixels, as the image crate expects them.
    pub fn dimensions(&self) -> (u32, u32) {
        // Both extents were checked against u32::MAX in `new`.
        (self.cols() as u32, self.rows() as u32)
    }

    /// Borrow one channel plane.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.channel_count()`.
    pub fn channel(&self, index: usize) -> ArrayView2<'_, f32> {
        self.data.index_axis(Axis(0), index)
    }

    /// Iterate channel planes in index order.
    pub fn channels(&self) -> impl Iterator<Item = ArrayView2<'_, f32>> {
        self.data.outer_iter()
    }

    pub fn view(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array3<f32> {
        self.data
    }
}

impl TryFrom<Array3<f32>> for MultiChannelImage {
    type Error = StainviewError;

    fn try_from(data: Array3<f32>) -> Result<Self> {
        Self::new(data)
    }
}

impl TryFrom<ArrayD<f32>> for MultiChannelImage {
    type Error = StainviewError;

    fn try_from(data: ArrayD<f32>) -> Result<Self> {
        Self::from_dyn(data)
    }
}

fn check_extent(name: &str, size: usize) -> Result<()> {
    if size == 0 {
        return Err(StainviewError::InvalidShape {
            message: format!("{name} must be positive"),
        });
    }
    if u32::try_from(size).is_err() {
        return Err(StainviewError::InvalidShape {
            message: format!("{name} = {size} exceeds the maximum image extent"),
        });
    }
    Ok(())
}
