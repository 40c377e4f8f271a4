//! Init command - create a configuration file.

use crate::commands::common::GlobalArgs;
use crate::error::CliError;
use landcover::SourceConfig;

/// Run the init command.
pub fn run(args: &GlobalArgs, base_url: String, force: bool) -> Result<(), CliError> {
    let path = args.config_path();
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path));
    }

    let mut config = SourceConfig::new(base_url);
    if let Some(dir) = &args.cache_dir {
        config = config.with_cache_dir(dir);
    }
    config.validate()?;
    config.save_to(&path)?;

    println!("Configuration file: {}", path.display());
    println!("Tile cache:         {}", config.cache_dir.display());
    println!();
    println!("Edit this file to customize cache and network settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
