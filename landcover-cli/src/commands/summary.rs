//! Summary command - category histogram over a rectangular area.
//!
//! Rows of the sample grid are spread over the rayon pool; each worker
//! blocks on tile loads through the shared source.

use std::collections::HashMap;

use clap::Args;
use landcover::{Category, TerrainKind};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::commands::common::{finish, open_source, GlobalArgs};
use crate::error::CliError;

/// Arguments of the summary command.
#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    /// World X coordinate of the area's corner
    #[arg(long, allow_hyphen_values = true)]
    pub x: i32,

    /// World Z coordinate of the area's corner
    #[arg(long, allow_hyphen_values = true)]
    pub z: i32,

    /// Extent along X in world units
    #[arg(long)]
    pub width: u32,

    /// Extent along Z in world units
    #[arg(long)]
    pub depth: u32,

    /// Distance between sample points in world units
    #[arg(long, default_value = "100")]
    pub step: u32,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Area sampled by the summary command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGrid {
    pub x: i32,
    pub z: i32,
    pub columns: u32,
    pub rows: u32,
    pub step: u32,
}

impl SampleGrid {
    /// Validate the arguments and derive the grid.
    pub fn from_args(args: &SummaryArgs) -> Result<Self, CliError> {
        if args.step == 0 {
            return Err(CliError::InvalidArgument("--step must be positive".to_string()));
        }
        if args.width == 0 || args.depth == 0 {
            return Err(CliError::InvalidArgument(
                "--width and --depth must be positive".to_string(),
            ));
        }
        if args.x as i64 + args.width as i64 > i32::MAX as i64 + 1
            || args.z as i64 + args.depth as i64 > i32::MAX as i64 + 1
        {
            return Err(CliError::InvalidArgument(
                "area extends past the coordinate range".to_string(),
            ));
        }

        Ok(Self {
            x: args.x,
            z: args.z,
            columns: args.width.div_ceil(args.step),
            rows: args.depth.div_ceil(args.step),
            step: args.step,
        })
    }

    /// Number of sample points.
    pub fn point_count(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    fn coordinate(origin: i32, index: u32, step: u32) -> i32 {
        (origin as i64 + index as i64 * step as i64) as i32
    }

    /// Count categories over the grid, sampling rows in parallel.
    pub fn histogram<F>(&self, sample: F) -> HashMap<Category, u64>
    where
        F: Fn(i32, i32) -> Category + Sync,
    {
        (0..self.rows)
            .into_par_iter()
            .fold(HashMap::new, |mut counts, row| {
                let z = Self::coordinate(self.z, row, self.step);
                for column in 0..self.columns {
                    let x = Self::coordinate(self.x, column, self.step);
                    *counts.entry(sample(x, z)).or_insert(0) += 1;
                }
                counts
            })
            .reduce(HashMap::new, |mut left, right| {
                for (category, count) in right {
                    *left.entry(category).or_insert(0) += count;
                }
                left
            })
    }
}

/// One histogram line.
#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub terrain: TerrainKind,
    pub count: u64,
    pub fraction: f64,
}

/// Result of the summary command.
#[derive(Debug, Serialize)]
pub struct AreaSummary {
    pub x: i32,
    pub z: i32,
    pub width: u32,
    pub depth: u32,
    pub step: u32,
    pub samples: u64,
    pub categories: Vec<CategoryCount>,
}

impl AreaSummary {
    /// Build the summary, listing categories in descending count order.
    pub fn new(args: &SummaryArgs, grid: &SampleGrid, counts: &HashMap<Category, u64>) -> Self {
        let samples = grid.point_count();
        let mut categories: Vec<CategoryCount> = Category::ALL
            .iter()
            .filter_map(|&category| {
                let count = counts.get(&category).copied().unwrap_or(0);
                (count > 0).then(|| CategoryCount {
                    category,
                    terrain: category.terrain(),
                    count,
                    fraction: count as f64 / samples as f64,
                })
            })
            .collect();
        // Stable sort keeps table order among equal counts.
        categories.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            x: args.x,
            z: args.z,
            width: args.width,
            depth: args.depth,
            step: args.step,
            samples,
            categories,
        }
    }

    fn print(&self) {
        println!(
            "Area x={}..{}, z={}..{} (step {}, {} samples)",
            self.x,
            self.x as i64 + self.width as i64,
            self.z,
            self.z as i64 + self.depth as i64,
            self.step,
            self.samples
        );
        println!();
        for entry in &self.categories {
            println!(
                "  {:<32} {:<11} {:>10} {:>6.1}%",
                entry.category.to_string(),
                entry.terrain.to_string(),
                entry.count,
                entry.fraction * 100.0
            );
        }
    }
}

/// Run the summary command.
pub fn run(global: &GlobalArgs, args: SummaryArgs) -> Result<(), CliError> {
    let grid = SampleGrid::from_args(&args)?;
    let source = open_source(global)?;

    info!(
        points = grid.point_count(),
        columns = grid.columns,
        rows = grid.rows,
        "Sampling area"
    );
    let counts = grid.histogram(|x, z| source.sample(x, z));
    let summary = AreaSummary::new(&args, &grid, &counts);

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{}", json);
    } else {
        summary.print();
        println!();
        println!("Cache: {}", source.stats());
    }

    finish(&source);
    Ok(())
}
