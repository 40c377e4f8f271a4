//! Error types for raster decoding.

use thiserror::Error;

/// Errors that can occur while decoding a tile raster.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The raster is not a single-channel, 8-bit layout.
    #[error("Unsupported raster layout: {0}")]
    UnsupportedLayout(String),

    /// The raster does not have the dimensions of a dataset tile.
    #[error("Invalid dimensions {width}×{height}, expected {expected}×{expected}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        expected: usize,
    },

    /// The decoded buffer is shorter than the declared dimensions.
    #[error("Truncated raster: {actual} of {expected} samples")]
    Truncated { actual: usize, expected: usize },

    /// PNG stream is malformed.
    #[error("PNG decode failed: {0}")]
    Png(#[from] png::DecodingError),

    /// Any other image container failed to decode.
    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),
}
