//! Sample command - category at one world coordinate.

use landcover::locate;

use crate::commands::common::{finish, open_source, GlobalArgs};
use crate::error::CliError;

/// Run the sample command.
pub fn run(args: &GlobalArgs, x: i32, z: i32) -> Result<(), CliError> {
    let source = open_source(args)?;
    let (pos, local) = locate(x, z);

    let category = source.sample(x, z);

    println!("Location: x={}, z={}", x, z);
    println!("  Tile:     {} ({})", pos, pos.file_name());
    println!("  Sample:   column {}, row {}", local.x, local.z);
    println!("  Category: {}", category);
    println!("  Terrain:  {}", category.terrain());

    finish(&source);
    Ok(())
}
