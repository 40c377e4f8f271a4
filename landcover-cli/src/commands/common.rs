//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use landcover::config::config_file_path;
use landcover::{ConfigError, LandCoverSource, SourceConfig};

use crate::error::CliError;

/// Options accepted by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (default: <config dir>/landcover/config.ini)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset base address, overriding the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Local tile cache directory, overriding the config file
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,
}

impl GlobalArgs {
    /// Config file to read.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }
}

/// Resolve settings from the config file and command-line overrides.
///
/// CLI arguments take precedence. Without a config file, `--base-url` alone
/// is enough and everything else uses defaults.
pub fn resolve_config(args: &GlobalArgs) -> Result<SourceConfig, CliError> {
    let path = args.config_path();

    let config = match &args.base_url {
        None => SourceConfig::load_from(&path)?,
        Some(base_url) => match SourceConfig::load_with_base_url(&path, base_url) {
            Err(ConfigError::NotFound(_)) => SourceConfig::new(base_url.as_str()),
            other => other?,
        },
    };

    let config = match &args.cache_dir {
        Some(dir) => config.with_cache_dir(dir),
        None => config,
    };

    config.validate()?;
    Ok(config)
}

/// Build a source from resolved settings.
pub fn open_source(args: &GlobalArgs) -> Result<LandCoverSource, CliError> {
    let config = resolve_config(args)?;
    Ok(LandCoverSource::new(config)?)
}

/// Wait for background writes so fetched tiles land on disk before exit.
pub fn finish(source: &LandCoverSource) {
    let deadline = Instant::now() + Duration::from_secs(30);
    while source.pending_writes() > 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(20));
    }
    source.shutdown();
}
