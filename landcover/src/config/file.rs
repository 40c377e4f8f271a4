//! Configuration file handling for `<config dir>/landcover/config.ini`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::SourceConfig;
use crate::coord::DatasetBounds;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file does not exist
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read or parse the config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required key has no value
    #[error("Missing configuration: {section}.{key} must be set")]
    MissingValue { section: String, key: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl SourceConfig {
    /// Load configuration from `path`.
    ///
    /// Missing keys keep their defaults, except `[source] base_url` which
    /// has none.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini, None)
    }

    /// Load configuration from `path`, taking the dataset address from
    /// `base_url` instead of the file.
    pub fn load_with_base_url(path: &Path, base_url: &str) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini, Some(base_url))
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        to_ini(self).write_to_file(path).map_err(write_error)
    }
}

/// Path of the default config file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("landcover")
        .join("config.ini")
}

fn parse_ini(ini: &Ini, base_url: Option<&str>) -> Result<SourceConfig, ConfigError> {
    let base_url = base_url
        .or_else(|| ini.get_from(Some("source"), "base_url"))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingValue {
            section: "source".to_string(),
            key: "base_url".to_string(),
        })?;

    let mut config = SourceConfig::new(base_url);

    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = section.get("cache_dir") {
            let v = v.trim();
            if !v.is_empty() {
                config.cache_dir = PathBuf::from(v);
            }
        }
    }

    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("capacity") {
            config.cache.capacity = parse_number("cache", "capacity", v)?;
        }
        if let Some(v) = section.get("ttl_secs") {
            config.cache.ttl = Duration::from_secs(parse_number("cache", "ttl_secs", v)?);
        }
    }

    if let Some(section) = ini.section(Some("network")) {
        if let Some(v) = section.get("timeout_secs") {
            config.fetch_timeout =
                Duration::from_secs(parse_number("network", "timeout_secs", v)?);
        }
        if let Some(v) = section.get("io_threads") {
            config.io_threads = parse_number("network", "io_threads", v)?;
        }
    }

    if let Some(section) = ini.section(Some("loader")) {
        if let Some(v) = section.get("refetch_corrupt_cache") {
            config.refetch_corrupt_cache = parse_bool("loader", "refetch_corrupt_cache", v)?;
        }
        if let Some(v) = section.get("bounds") {
            config.bounds = parse_bool("loader", "bounds", v)?.then(DatasetBounds::default);
        }
    }

    config.validate()?;
    Ok(config)
}

fn to_ini(config: &SourceConfig) -> Ini {
    let mut ini = Ini::new();
    ini.with_section(Some("source"))
        .set("base_url", config.base_url.as_str())
        .set("cache_dir", config.cache_dir.to_string_lossy());
    ini.with_section(Some("cache"))
        .set("capacity", config.cache.capacity.to_string())
        .set("ttl_secs", config.cache.ttl.as_secs().to_string());
    ini.with_section(Some("network"))
        .set("timeout_secs", config.fetch_timeout.as_secs().to_string())
        .set("io_threads", config.io_threads.to_string());
    ini.with_section(Some("loader"))
        .set(
            "refetch_corrupt_cache",
            config.refetch_corrupt_cache.to_string(),
        )
        .set("bounds", config.bounds.is_some().to_string());
    ini
}

fn parse_number<T: std::str::FromStr>(
    section: &str,
    key: &str,
    value: &str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: "expected a non-negative integer".to_string(),
    })
}

fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
