//! Source configuration.
//!
//! [`SourceConfig`] is the single configuration surface of a
//! [`LandCoverSource`](crate::source::LandCoverSource). It can be built in
//! code with the `with_*` setters or loaded from an INI file via
//! [`SourceConfig::load_from`].

mod file;

pub use file::{config_file_path, ConfigError};

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::coord::DatasetBounds;
use crate::provider::DEFAULT_TIMEOUT;

/// Default number of runtime worker threads for fetches and write-back.
pub const DEFAULT_IO_THREADS: usize = 2;

/// Default local cache directory (`<user cache dir>/landcover/globcover`).
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("landcover")
        .join("globcover")
}

/// Configuration of a land-cover source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceConfig {
    /// Dataset base address; tiles are fetched from `<base_url>/<file name>`.
    pub base_url: String,

    /// Local persistent cache directory.
    pub cache_dir: PathBuf,

    /// In-memory cache bounds.
    pub cache: CacheConfig,

    /// Per-fetch timeout.
    pub fetch_timeout: Duration,

    /// Worker threads of the I/O runtime.
    pub io_threads: usize,

    /// Tiles the dataset publishes; `None` requests every tile.
    pub bounds: Option<DatasetBounds>,

    /// Fetch again when a local cache file fails to decode.
    pub refetch_corrupt_cache: bool,
}

impl SourceConfig {
    /// Create a config with defaults for everything but the dataset address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cache_dir: default_cache_dir(),
            cache: CacheConfig::default(),
            fetch_timeout: DEFAULT_TIMEOUT,
            io_threads: DEFAULT_IO_THREADS,
            bounds: Some(DatasetBounds::default()),
            refetch_corrupt_cache: false,
        }
    }

    /// Set the local cache directory.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Set the maximum number of resident tiles.
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache.capacity = capacity;
        self
    }

    /// Set the idle expiry of resident tiles.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache.ttl = ttl;
        self
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the number of I/O runtime threads.
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads;
        self
    }

    /// Set the dataset bounds.
    pub fn with_bounds(mut self, bounds: Option<DatasetBounds>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Fall back to the network for corrupt local cache files.
    pub fn with_refetch_corrupt_cache(mut self, refetch: bool) -> Self {
        self.refetch_corrupt_cache = refetch;
        self
    }

    /// Check values that would make the source unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingValue {
                section: "source".to_string(),
                key: "base_url".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                section: "source".to_string(),
                key: "base_url".to_string(),
                value: self.base_url.clone(),
                reason: "must be an http:// or https:// address".to_string(),
            });
        }
        if self.cache.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                section: "cache".to_string(),
                key: "capacity".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.io_threads == 0 {
            return Err(ConfigError::InvalidValue {
                section: "network".to_string(),
                key: "io_threads".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_config_defaults() {
        let config = SourceConfig::new("https://example.org/globcover");
        assert_eq!(config.cache.capacity, 16);
        assert_eq!(config.cache.ttl, Duration::from_secs(10));
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.io_threads, 2);
        assert_eq!(config.bounds, Some(DatasetBounds::default()));
        assert!(!config.refetch_corrupt_cache);
        assert!(config.cache_dir.ends_with("landcover/globcover"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_config_builder() {
        let config = SourceConfig::new("https://example.org")
            .with_cache_dir("/tmp/tiles")
            .with_cache_capacity(4)
            .with_cache_ttl(Duration::from_secs(1))
            .with_fetch_timeout(Duration::from_secs(5))
            .with_io_threads(1)
            .with_bounds(None)
            .with_refetch_corrupt_cache(true);

        assert_eq!(config.cache_dir, PathBuf::from("/tmp/tiles"));
        assert_eq!(config.cache.capacity, 4);
        assert_eq!(config.cache.ttl, Duration::from_secs(1));
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.io_threads, 1);
        assert_eq!(config.bounds, None);
        assert!(config.refetch_corrupt_cache);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            SourceConfig::new("").validate(),
            Err(ConfigError::MissingValue { .. })
        ));
        assert!(matches!(
            SourceConfig::new("ftp://example.org").validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(SourceConfig::new("https://example.org")
            .with_cache_capacity(0)
            .validate()
            .is_err());
        assert!(SourceConfig::new("https://example.org")
            .with_io_threads(0)
            .validate()
            .is_err());
    }
}
