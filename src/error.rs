//! Error types for stainview.
//!
//! Every fallible operation in the crate returns [`Result`], and every failure
//! is surfaced synchronously to the caller. Nothing is retried.

use thiserror::Error;

/// The main error type for stainview operations.
#[derive(Error, Debug)]
pub enum StainviewError {
    /// More channels than colors in the active table
    #[error("Image has {channels} channels but the color table only has {table_len} entries")]
    ChannelCountExceedsTable { channels: usize, table_len: usize },

    /// Input array has the wrong dimensionality or an unusable extent
    #[error("Invalid shape: {message}")]
    InvalidShape { message: String },

    /// Intensity that cannot be represented as an 8-bit alpha value
    #[error(
        "Intensity out of range in channel {channel}: {value} ({count} samples outside [0, 255])"
    )]
    IntensityOutOfRange {
        channel: usize,
        value: f32,
        count: usize,
    },

    /// Color table entry errors
    #[error("Invalid color at index {index}: {message}")]
    InvalidColor { index: usize, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },
}

/// Convenience type alias for Results with StainviewError
pub type Result<T> = std::result::Result<T, StainviewError>;
