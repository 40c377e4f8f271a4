//! Loader error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::coord::TilePosition;
use crate::provider::ProviderError;
use crate::raster::RasterError;

/// Reasons a tile could not be loaded.
///
/// These never leave the loader; they are logged and the tile is replaced by
/// the empty tile.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset does not publish a tile at this position.
    #[error("Tile {0} is outside the dataset bounds")]
    OutOfBounds(TilePosition),

    /// The local cache file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The local cache file exists but does not decode.
    #[error("Cached tile {} is corrupt: {source}", path.display())]
    Corrupt { path: PathBuf, source: RasterError },

    /// The remote payload does not decode.
    #[error("Failed to decode fetched tile: {0}")]
    Decode(#[from] RasterError),

    /// The remote fetch failed.
    #[error("Failed to fetch tile: {0}")]
    Fetch(#[from] ProviderError),
}

/// Reasons a fetched tile could not be written to the local cache.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to create cache directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to move {} into place: {source}", path.display())]
    Rename { path: PathBuf, source: io::Error },
}
