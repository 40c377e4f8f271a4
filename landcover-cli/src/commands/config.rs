//! Config command - show the resolved configuration.

use crate::commands::common::{resolve_config, GlobalArgs};
use crate::error::CliError;

/// Run the config command.
pub fn run(args: &GlobalArgs) -> Result<(), CliError> {
    let config = resolve_config(args)?;

    println!("Config file:  {}", args.config_path().display());
    println!();
    println!("[source]");
    println!("  base_url              = {}", config.base_url);
    println!("  cache_dir             = {}", config.cache_dir.display());
    println!("[cache]");
    println!("  capacity              = {}", config.cache.capacity);
    println!("  ttl_secs              = {}", config.cache.ttl.as_secs());
    println!("[network]");
    println!("  timeout_secs          = {}", config.fetch_timeout.as_secs());
    println!("  io_threads            = {}", config.io_threads);
    println!("[loader]");
    println!("  refetch_corrupt_cache = {}", config.refetch_corrupt_cache);
    match config.bounds {
        Some(bounds) => println!(
            "  bounds                = tileX {}..={}, tileZ {}..={} ({} tiles)",
            bounds.min_x,
            bounds.max_x,
            bounds.min_z,
            bounds.max_z,
            bounds.tile_count()
        ),
        None => println!("  bounds                = none"),
    }
    Ok(())
}
