//! Fetch command - load one tile into the local cache.

use std::time::Instant;

use landcover::{Category, TilePosition};
use tracing::debug;

use crate::commands::common::{finish, open_source, GlobalArgs};
use crate::error::CliError;

/// Run the fetch command.
pub fn run(args: &GlobalArgs, tile_x: i32, tile_z: i32) -> Result<(), CliError> {
    let source = open_source(args)?;
    let pos = TilePosition::new(tile_x, tile_z);

    let started = Instant::now();
    let tile = source.tile(pos);
    let elapsed = started.elapsed();
    debug!(tile = %pos.file_name(), loaded = tile.is_loaded(), ?elapsed, "Fetch finished");

    if !tile.is_loaded() {
        println!(
            "Tile {} has no data (outside the dataset or unavailable, see log)",
            pos
        );
        finish(&source);
        return Ok(());
    }

    let classified = tile
        .samples()
        .iter()
        .filter(|&&code| landcover::classify(code) != Category::NoData)
        .count();

    println!("Tile {} loaded in {:.2?}", pos, elapsed);
    println!(
        "  Classified samples: {} of {} ({:.1}%)",
        classified,
        tile.samples().len(),
        classified as f64 * 100.0 / tile.samples().len() as f64
    );

    finish(&source);
    println!(
        "  Cached at: {}",
        source.cache().loader().cache_path(pos).display()
    );
    Ok(())
}
