//! In-memory tile cache.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  LandCoverSource    │  sample(x, z)
//! └──────────┬──────────┘
//!            │ get(pos)
//!            ▼
//! ┌─────────────────────┐  hit ──► Arc<Tile>
//! │  TileCache          │
//! │  (moka, LRU + TTI)  │  miss ─┐
//! └─────────────────────┘        │ load(pos)
//!                                ▼
//!                      ┌─────────────────────┐
//!                      │  impl TileLoader    │
//!                      └─────────────────────┘
//! ```
//!
//! Both bounds apply at once: at most `capacity` tiles are resident, and a
//! tile that has not been read for `ttl` is dropped.

mod memory;

pub use memory::TileCache;

use std::fmt;
use std::time::Duration;

/// Default number of resident tiles.
pub const DEFAULT_CAPACITY: u64 = 16;

/// Default idle expiry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

/// Tile cache configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of resident tiles.
    pub capacity: u64,
    /// Time without access after which a tile is dropped.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: DEFAULT_TTL,
        }
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from memory.
    pub hits: u64,
    /// Lookups that invoked the loader.
    pub misses: u64,
    /// Loads that failed and were served the empty tile.
    pub failed_loads: u64,
    /// Resident tiles.
    pub entry_count: u64,
}

impl CacheStats {
    /// Fraction of lookups served from memory.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hits, {} misses ({} failed), {} resident, {:.1}% hit rate",
            self.hits,
            self.misses,
            self.failed_loads,
            self.entry_count,
            self.hit_rate() * 100.0
        )
    }
}
