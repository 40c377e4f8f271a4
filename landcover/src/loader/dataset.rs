//! Two-tier dataset loader: local cache file first, remote fetch second.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use super::error::LoadError;
use super::writer::TileWriter;
use super::TileLoader;
use crate::coord::{DatasetBounds, TilePosition};
use crate::provider::{tile_url, AsyncHttpClient, ProviderError, DEFAULT_TIMEOUT};
use crate::raster::{self, RasterError};
use crate::tile::Tile;

/// Loads tiles from the local cache directory, falling back to the remote
/// dataset and writing fetched tiles back in the background.
///
/// Fetches run as tasks on the loader's runtime while `load` waits on a
/// channel, so `load` may be called from any thread, including one that is
/// driving another tokio runtime.
pub struct DatasetLoader<C> {
    client: Arc<C>,
    base_url: String,
    cache_dir: PathBuf,
    runtime: Handle,
    writer: TileWriter,
    cancellation: CancellationToken,
    fetch_timeout: Duration,
    bounds: Option<DatasetBounds>,
    refetch_corrupt: bool,
}

impl<C: AsyncHttpClient + 'static> DatasetLoader<C> {
    /// Creates a loader.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for remote fetches
    /// * `base_url` - Dataset base address
    /// * `cache_dir` - Local persistent cache directory
    /// * `runtime` - Runtime that drives fetches and background writes
    pub fn new(
        client: C,
        base_url: impl Into<String>,
        cache_dir: impl Into<PathBuf>,
        runtime: Handle,
    ) -> Self {
        Self {
            client: Arc::new(client),
            base_url: base_url.into(),
            cache_dir: cache_dir.into(),
            writer: TileWriter::new(runtime.clone()),
            runtime,
            cancellation: CancellationToken::new(),
            fetch_timeout: DEFAULT_TIMEOUT,
            bounds: Some(DatasetBounds::default()),
            refetch_corrupt: false,
        }
    }

    /// Set the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Restrict loads to tiles inside `bounds`; `None` allows every position.
    pub fn with_bounds(mut self, bounds: Option<DatasetBounds>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Fall back to the network when the local cache file is corrupt.
    pub fn with_refetch_corrupt(mut self, refetch: bool) -> Self {
        self.refetch_corrupt = refetch;
        self
    }

    /// Cancel in-flight and future fetches when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Local cache file for `pos`.
    pub fn cache_path(&self, pos: TilePosition) -> PathBuf {
        self.cache_dir.join(pos.file_name())
    }

    /// Local cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Number of background writes still in progress.
    pub fn pending_writes(&self) -> usize {
        self.writer.pending()
    }

    fn try_load(&self, pos: TilePosition) -> Result<Tile, LoadError> {
        if let Some(bounds) = self.bounds {
            if !bounds.contains(pos) {
                return Err(LoadError::OutOfBounds(pos));
            }
        }

        let path = self.cache_path(pos);
        match std::fs::read(&path) {
            Ok(bytes) => match decode_tile(&bytes) {
                Ok(tile) => {
                    debug!(tile = %pos.file_name(), "Loaded tile from local cache");
                    return Ok(tile);
                }
                Err(source) if self.refetch_corrupt => {
                    warn!(
                        tile = %pos.file_name(),
                        error = %source,
                        "Local cache file is corrupt, fetching again"
                    );
                }
                Err(source) => return Err(LoadError::Corrupt { path, source }),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(LoadError::Io { path, source }),
        }

        self.fetch(pos, path)
    }

    fn fetch(&self, pos: TilePosition, path: PathBuf) -> Result<Tile, LoadError> {
        let url = tile_url(&self.base_url, &pos.file_name());
        let bytes = self.fetch_bytes(url)?;
        let tile = decode_tile(&bytes)?;

        debug!(tile = %pos.file_name(), bytes = bytes.len(), "Fetched tile from remote");
        self.writer.persist(pos, path, bytes);
        Ok(tile)
    }

    /// Runs the request on the loader's runtime and waits for its result.
    fn fetch_bytes(&self, url: String) -> Result<Vec<u8>, ProviderError> {
        let client = Arc::clone(&self.client);
        let cancellation = self.cancellation.clone();
        let timeout = self.fetch_timeout;
        let (tx, rx) = mpsc::sync_channel(1);

        self.runtime.spawn(async move {
            let result = tokio::select! {
                biased;
                _ = cancellation.cancelled() => Err(ProviderError::Cancelled),
                result = tokio::time::timeout(timeout, client.get(&url)) => {
                    result.unwrap_or_else(|_| {
                        Err(ProviderError::Timeout {
                            url: url.clone(),
                            timeout,
                        })
                    })
                }
            };
            let _ = tx.send(result);
        });

        // The sender is dropped without a result when the runtime shuts down.
        rx.recv().unwrap_or(Err(ProviderError::Cancelled))
    }
}

impl<C: AsyncHttpClient + 'static> TileLoader for DatasetLoader<C> {
    #[instrument(level = "debug", skip(self), fields(tile = %pos.file_name()))]
    fn load(&self, pos: TilePosition) -> Option<Tile> {
        match self.try_load(pos) {
            Ok(tile) => Some(tile),
            Err(LoadError::OutOfBounds(_)) => {
                debug!(tile = %pos.file_name(), "Tile outside dataset, using empty tile");
                None
            }
            Err(LoadError::Fetch(e)) => {
                warn!(
                    tile = %pos.file_name(),
                    error = %e,
                    transient = e.is_transient(),
                    "Failed to fetch land-cover tile"
                );
                None
            }
            Err(e) => {
                warn!(tile = %pos.file_name(), error = %e, "Failed to load land-cover tile");
                None
            }
        }
    }
}

fn decode_tile(bytes: &[u8]) -> Result<Tile, RasterError> {
    raster::decode(bytes).and_then(Tile::from_samples)
}
