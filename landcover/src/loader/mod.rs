//! Tile loading
//!
//! The [`TileLoader`] trait is the seam between the in-memory cache and
//! whatever produces tiles. [`DatasetLoader`] is the production loader:
//!
//! ```text
//! load(pos)
//!   ├── outside dataset bounds ──────────────► None
//!   ├── <cache_dir>/f_X_Z_.txt exists ──decode──► Some(tile) | None
//!   └── GET <base_url>/f_X_Z_.txt ──decode──► Some(tile) | None
//!                                     └──► TileWriter (background write-back)
//! ```
//!
//! Every failure is logged with the tile name and reported as `None`; the
//! cache substitutes the empty tile.

mod dataset;
mod error;
mod writer;

pub use dataset::DatasetLoader;
pub use error::{LoadError, PersistError};
pub use writer::TileWriter;

use crate::coord::TilePosition;
use crate::tile::Tile;

/// Produces tiles for cache misses.
pub trait TileLoader: Send + Sync {
    /// Loads the tile at `pos`, or `None` if it could not be loaded.
    ///
    /// Implementations must not panic or propagate errors.
    fn load(&self, pos: TilePosition) -> Option<Tile>;
}
