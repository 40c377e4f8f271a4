//! In-memory tile cache using moka.
//!
//! Holds a small number of decoded tiles, keyed by [`TilePosition`]. Entries
//! expire after a period without access and the least recently used entry is
//! evicted when the cache is full. Misses are filled by a [`TileLoader`];
//! moka's per-key initialisation lets misses on different tiles load in
//! parallel while concurrent misses on the same tile share one load.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use tracing::debug;

use super::{CacheConfig, CacheStats};
use crate::coord::TilePosition;
use crate::loader::TileLoader;
use crate::tile::Tile;

/// Bounded, idle-expiring cache of decoded tiles.
pub struct TileCache<L> {
    cache: Cache<TilePosition, Arc<Tile>>,
    loader: L,
    hits: AtomicU64,
    misses: AtomicU64,
    failed_loads: AtomicU64,
}

impl<L: TileLoader> TileCache<L> {
    /// Creates a cache that fills misses from `loader`.
    pub fn new(loader: L, config: CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_idle(config.ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            cache,
            loader,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            failed_loads: AtomicU64::new(0),
        }
    }

    /// Returns the tile at `pos`, loading it on a miss.
    ///
    /// Never fails: a tile that cannot be loaded is served as the empty tile
    /// and stays cached until it expires like any other entry.
    pub fn get(&self, pos: TilePosition) -> Arc<Tile> {
        let mut loaded = false;
        let tile = self.cache.get_with(pos, || {
            loaded = true;
            self.load(pos)
        });

        if loaded {
            self.misses.fetch_add(1, Ordering::Relaxed);
            // Apply expiry and capacity eviction now rather than on moka's schedule.
            self.cache.run_pending_tasks();
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        tile
    }

    fn load(&self, pos: TilePosition) -> Arc<Tile> {
        match self.loader.load(pos) {
            Some(tile) => Arc::new(tile),
            None => {
                self.failed_loads.fetch_add(1, Ordering::Relaxed);
                debug!(tile = %pos.file_name(), "Caching empty tile");
                Tile::shared_empty()
            }
        }
    }

    /// Check if a tile is resident without touching its access time.
    pub fn contains(&self, pos: TilePosition) -> bool {
        self.cache.contains_key(&pos)
    }

    /// Number of resident tiles.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Run pending expiry and eviction.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }

    /// Drop every resident tile.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            failed_loads: self.failed_loads.load(Ordering::Relaxed),
            entry_count: self.cache.entry_count(),
        }
    }

    /// The loader filling misses.
    pub fn loader(&self) -> &L {
        &self.loader
    }
}
