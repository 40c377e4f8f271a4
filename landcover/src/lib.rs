//! Landcover - point queries against a tiled land-cover raster dataset
//!
//! The dataset is a grid of 2560×2560 tiles of classification codes, each
//! sample covering 10×10 world units. Tiles are read from a local cache
//! directory, fetched from a remote address when missing, and written back
//! in the background. A small in-memory cache keeps recently used tiles
//! decoded.
//!
//! # Example
//!
//! ```no_run
//! use landcover::{LandCoverSource, SourceConfig};
//!
//! let config = SourceConfig::new("https://example.org/globcover");
//! let source = LandCoverSource::new(config)?;
//!
//! let category = source.sample(1200, -4500);
//! println!("{} ({})", category, category.terrain());
//! # Ok::<(), landcover::SourceError>(())
//! ```

pub mod cache;
pub mod classify;
pub mod config;
pub mod coord;
pub mod loader;
pub mod logging;
pub mod provider;
pub mod raster;
pub mod source;
pub mod tile;

pub use cache::{CacheConfig, CacheStats};
pub use classify::{classify, Category, TerrainKind};
pub use config::{ConfigError, SourceConfig};
pub use coord::{locate, DatasetBounds, LocalIndex, TilePosition};
pub use source::{LandCoverSource, SourceError};
pub use tile::Tile;
