//! Land-cover source facade.
//!
//! [`LandCoverSource`] ties the pieces together: it owns the I/O runtime,
//! the two-tier loader and the in-memory tile cache, and answers point
//! queries with [`LandCoverSource::sample`].

use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::{Handle, Runtime};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cache::{CacheStats, TileCache};
use crate::classify::Category;
use crate::config::{ConfigError, SourceConfig};
use crate::coord::{locate, TilePosition};
use crate::loader::DatasetLoader;
use crate::provider::{AsyncHttpClient, AsyncReqwestClient, ProviderError};
use crate::tile::Tile;

/// Errors constructing a [`LandCoverSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// The I/O runtime could not be started
    #[error("Failed to start I/O runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// The HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] ProviderError),

    /// The configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Point-query access to the land-cover dataset.
///
/// `sample` may be called concurrently from any number of threads and from
/// async tasks. A miss blocks the calling thread until the tile is loaded;
/// the fetch itself runs on the source's own runtime.
pub struct LandCoverSource<C: AsyncHttpClient + 'static = AsyncReqwestClient> {
    cache: TileCache<DatasetLoader<C>>,
    shutdown: CancellationToken,
    // Taken in `drop`; `None` only while dropping.
    runtime: Option<Runtime>,
}

impl LandCoverSource<AsyncReqwestClient> {
    /// Create a source that fetches tiles over HTTP(S).
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let client = AsyncReqwestClient::with_timeout(config.fetch_timeout)?;
        Self::with_client(config, client)
    }
}

impl<C: AsyncHttpClient + 'static> LandCoverSource<C> {
    /// Create a source that fetches tiles through `client`.
    pub fn with_client(config: SourceConfig, client: C) -> Result<Self, SourceError> {
        config.validate()?;

        let threads = config.io_threads.max(1);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(threads)
            .max_blocking_threads(threads)
            .thread_name("landcover-io")
            .enable_all()
            .build()?;

        let shutdown = CancellationToken::new();
        let loader = DatasetLoader::new(
            client,
            config.base_url.as_str(),
            config.cache_dir.as_path(),
            runtime.handle().clone(),
        )
        .with_timeout(config.fetch_timeout)
        .with_bounds(config.bounds)
        .with_refetch_corrupt(config.refetch_corrupt_cache)
        .with_cancellation(shutdown.clone());

        info!(
            base_url = %config.base_url,
            cache_dir = %config.cache_dir.display(),
            capacity = config.cache.capacity,
            ttl_secs = config.cache.ttl.as_secs(),
            "Land-cover source ready"
        );

        Ok(Self {
            cache: TileCache::new(loader, config.cache),
            shutdown,
            runtime: Some(runtime),
        })
    }

    /// Land-cover category at world coordinate `(x, z)`.
    ///
    /// Never fails: positions whose tile cannot be loaded read as
    /// [`Category::NoData`].
    pub fn sample(&self, x: i32, z: i32) -> Category {
        let (pos, local) = locate(x, z);
        self.cache.get(pos).category(local)
    }

    /// The tile at `pos`, loading it if it is not resident.
    pub fn tile(&self, pos: TilePosition) -> Arc<Tile> {
        self.cache.get(pos)
    }

    /// Cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of fetched tiles still being written to the local cache.
    pub fn pending_writes(&self) -> usize {
        self.cache.loader().pending_writes()
    }

    /// Cancel in-flight fetches; later misses resolve to the empty tile
    /// without touching the network.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            info!(pending_writes = self.pending_writes(), "Shutting down land-cover source");
            self.shutdown.cancel();
        }
    }

    /// The underlying tile cache.
    pub fn cache(&self) -> &TileCache<DatasetLoader<C>> {
        &self.cache
    }
}

impl<C: AsyncHttpClient + 'static> Drop for LandCoverSource<C> {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(runtime) = self.runtime.take() {
            // A blocking runtime drop panics inside another runtime.
            if Handle::try_current().is_ok() {
                runtime.shutdown_background();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::REGION_SPAN;
    use crate::provider::MockHttpClient;
    use crate::testing::uniform_tile_png;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> SourceConfig {
        SourceConfig::new("https://tiles.example.org/globcover").with_cache_dir(dir.path())
    }

    fn wait_for_writes<C: AsyncHttpClient + 'static>(source: &LandCoverSource<C>) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while source.pending_writes() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_sample_reads_category() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(MockHttpClient::ok(uniform_tile_png(40)));
        let source = LandCoverSource::with_client(config(&dir), Arc::clone(&client)).unwrap();

        assert_eq!(source.sample(0, 0), Category::BroadleafEvergreen);
        assert_eq!(
            source.sample(REGION_SPAN - 1, REGION_SPAN - 1),
            Category::BroadleafEvergreen
        );
        assert_eq!(client.calls(), 1);

        let stats = source.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        wait_for_writes(&source);
    }

    #[test]
    fn test_sample_never_fails() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(MockHttpClient::failing(ProviderError::HttpStatus {
            status: 404,
            url: String::new(),
        }));
        let source = LandCoverSource::with_client(config(&dir), client).unwrap();

        assert_eq!(source.sample(0, 0), Category::NoData);
        assert_eq!(source.sample(i32::MIN, i32::MAX), Category::NoData);
        assert_eq!(source.stats().failed_loads, 2);
    }

    #[test]
    fn test_tile_returns_shared_tile() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(MockHttpClient::ok(uniform_tile_png(140)));
        let source = LandCoverSource::with_client(config(&dir), client).unwrap();

        let pos = TilePosition::new(1, -1);
        let tile = source.tile(pos);
        assert!(tile.is_loaded());
        assert!(Arc::ptr_eq(&tile, &source.tile(pos)));
        assert!(source.cache().contains(pos));
        wait_for_writes(&source);
    }

    #[test]
    fn test_shutdown_stops_fetching() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(MockHttpClient::ok(uniform_tile_png(140)));
        let source = LandCoverSource::with_client(config(&dir), Arc::clone(&client)).unwrap();

        source.shutdown();
        source.shutdown();
        assert_eq!(source.sample(0, 0), Category::NoData);
    }

    #[test]
    fn test_sample_from_async_task() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(MockHttpClient::ok(uniform_tile_png(140)));
        let source =
            Arc::new(LandCoverSource::with_client(config(&dir), Arc::clone(&client)).unwrap());
        let caller = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        let task_source = Arc::clone(&source);
        let category = caller
            .block_on(async move { tokio::spawn(async move { task_source.sample(0, 0) }).await })
            .unwrap();

        assert_eq!(category, Category::Grassland);
        assert_eq!(client.calls(), 1);
        wait_for_writes(&source);
    }

    #[tokio::test]
    async fn test_source_lives_inside_async_context() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(MockHttpClient::ok(uniform_tile_png(210)));
        let source = LandCoverSource::with_client(config(&dir), client).unwrap();

        assert_eq!(source.sample(-1, -1), Category::Water);
        drop(source);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(MockHttpClient::ok(Vec::new()));
        let result = LandCoverSource::with_client(config(&dir).with_cache_capacity(0), client);
        assert!(matches!(result, Err(SourceError::Config(_))));
    }
}
