//! Per-channel stain colors.
//!
//! A [`ColorTable`] assigns one RGB color to each channel, in channel order.
//! When the caller supplies none, [`DEFAULT_COLORS`] is used.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StainviewError};

/// An RGB triple.
pub type Rgb = [u8; 3];

/// Default stain colors, in channel order.
pub const DEFAULT_COLORS: [Rgb; 7] = [
    [0, 0, 255],     // blue (usually DAPI)
    [255, 51, 153],  // magenta
    [255, 0, 0],     // red
    [255, 255, 0],   // yellow
    [51, 153, 255],  // cyan
    [255, 128, 0],   // orange
    [0, 204, 0],     // green
];

/// Shared instance of the default table, used when no table is supplied.
pub static DEFAULT_TABLE: Lazy<ColorTable> = Lazy::new(ColorTable::default);

/// One color per channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[i64; 3]>", into = "Vec<Rgb>")]
pub struct ColorTable {
    colors: Vec<Rgb>,
}

impl ColorTable {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Build a table from integer triples, rejecting components outside [0, 255].
    pub fn from_ints(triples: &[[i64; 3]]) -> Result<Self> {
        let colors = triples
            .iter()
            .enumerate()
            .map(|(index, triple)| {
                let mut rgb = [0u8; 3];
                for (out, &component) in rgb.iter_mut().zip(triple.iter()) {
                    *out = u8::try_from(component).map_err(|_| StainviewError::InvalidColor {
                        index,
                        message: format!("component {component} is outside [0, 255]"),
                    })?;
                }
                Ok(rgb)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// A one-entry table holding the color of channel `index`.
    pub fn single(&self, index: usize) -> Option<ColorTable> {
        self.get(index).map(|rgb| ColorTable { colors: vec![rgb] })
    }

    /// Fail unless the table has a color for each of `channels` channels.
    pub fn ensure_covers(&self, channels: usize) -> Result<()> {
        if channels > self.colors.len() {
            return Err(StainviewError::ChannelCountExceedsTable {
                channels,
                table_len: self.colors.len(),
            });
        }
        Ok(())
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl TryFrom<Vec<[i64; 3]>> for ColorTable {
    type Error = StainviewError;

    fn try_from(triples: Vec<[i64; 3]>) -> Result<Self> {
        Self::from_ints(&triples)
    }
}

impl From<ColorTable> for Vec<Rgb> {
    fn from(table: ColorTable) -> Self {
        table.colors
    }
}
