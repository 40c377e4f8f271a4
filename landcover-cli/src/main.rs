//! Landcover CLI - Command-line interface
//!
//! Point and area queries against a tiled land-cover dataset.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use landcover::logging::{default_log_dir, default_log_file, init_logging};

use crate::commands::common::GlobalArgs;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "landcover")]
#[command(version, about = "Query a tiled land-cover dataset", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Directory for the log file
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file pointing at a dataset
    Init {
        /// Dataset base address, e.g. https://example.org/globcover
        base_url: String,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the resolved configuration
    Config,

    /// Print the land-cover category at a world coordinate
    Sample {
        /// World X coordinate
        #[arg(long, allow_hyphen_values = true)]
        x: i32,

        /// World Z coordinate
        #[arg(long, allow_hyphen_values = true)]
        z: i32,
    },

    /// Load one dataset tile into the local cache
    Fetch {
        /// Tile X index
        #[arg(long, allow_hyphen_values = true)]
        tile_x: i32,

        /// Tile Z index
        #[arg(long, allow_hyphen_values = true)]
        tile_z: i32,
    },

    /// Sample a rectangular area and print a category histogram
    Summary(commands::summary::SummaryArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    let _logging_guard = match init_logging(&log_dir, default_log_file()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Commands::Init { base_url, force } => commands::init::run(&cli.global, base_url, force),
        Commands::Config => commands::config::run(&cli.global),
        Commands::Sample { x, z } => commands::sample::run(&cli.global, x, z),
        Commands::Fetch { tile_x, tile_z } => commands::fetch::run(&cli.global, tile_x, tile_z),
        Commands::Summary(args) => commands::summary::run(&cli.global, args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
