//! Raster decoding for dataset tiles.
//!
//! Tiles are published as single-channel rasters, normally palette PNGs whose
//! palette indices are the raw classification codes. Decoding must keep the
//! indices rather than expanding them through the palette, so PNG input goes
//! through the `png` crate with all transformations disabled. Other
//! containers (8-bit grayscale TIFF, BMP, ...) are read with `image`.
//!
//! # Example
//!
//! ```ignore
//! use landcover::raster::decode;
//!
//! let samples = decode(&bytes)?;
//! assert_eq!(samples.len(), landcover::coord::TILE_SIZE.pow(2));
//! ```

mod decoder;
mod error;

pub use decoder::{decode, decode_with_size};
pub use error::RasterError;
