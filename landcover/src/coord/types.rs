//! Coordinate type definitions

use std::fmt;

/// Side length of a tile in samples.
pub const TILE_SIZE: usize = 2560;

/// World units represented by a single raw sample.
pub const SAMPLE_SCALE: i32 = 10;

/// World units covered by one tile along each axis.
pub const REGION_SPAN: i32 = TILE_SIZE as i32 * SAMPLE_SCALE;

/// Tile grid extent of the reference dataset, inclusive on both ends.
pub const MIN_TILE_X: i32 = -26;
pub const MAX_TILE_X: i32 = 25;
pub const MIN_TILE_Z: i32 = -13;
pub const MAX_TILE_Z: i32 = 9;

/// Position of a tile in the dataset grid.
///
/// Tile `(0, 0)` covers world coordinates `0..REGION_SPAN` on both axes;
/// negative indices cover negative world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePosition {
    /// Tile index along the X axis
    pub tile_x: i32,
    /// Tile index along the Z axis
    pub tile_z: i32,
}

impl TilePosition {
    /// Creates a tile position from grid indices.
    #[inline]
    pub const fn new(tile_x: i32, tile_z: i32) -> Self {
        Self { tile_x, tile_z }
    }

    /// Deterministic name of this tile, used both as the local cache file
    /// name and as the path component of the remote address.
    pub fn file_name(&self) -> String {
        format!("f_{}_{}_.txt", self.tile_x, self.tile_z)
    }

    /// Smallest world X coordinate covered by this tile.
    ///
    /// Widened to `i64` since the edge tiles of the `i32` range start
    /// below `i32::MIN`.
    #[inline]
    pub fn min_x(&self) -> i64 {
        self.tile_x as i64 * REGION_SPAN as i64
    }

    /// Smallest world Z coordinate covered by this tile.
    #[inline]
    pub fn min_z(&self) -> i64 {
        self.tile_z as i64 * REGION_SPAN as i64
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.tile_x, self.tile_z)
    }
}

/// Sample offset inside a tile, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalIndex {
    /// Column within the tile (0..TILE_SIZE)
    pub x: usize,
    /// Row within the tile (0..TILE_SIZE)
    pub z: usize,
}

impl LocalIndex {
    /// Offset of this sample in a flat row-major buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.x + self.z * TILE_SIZE
    }
}

/// Inclusive rectangle of tile positions the dataset actually publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetBounds {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl DatasetBounds {
    /// Creates bounds from inclusive tile index ranges.
    pub const fn new(min_x: i32, min_z: i32, max_x: i32, max_z: i32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    /// Returns true if the dataset has a tile at `pos`.
    #[inline]
    pub fn contains(&self, pos: TilePosition) -> bool {
        (self.min_x..=self.max_x).contains(&pos.tile_x)
            && (self.min_z..=self.max_z).contains(&pos.tile_z)
    }

    /// Number of tiles inside the bounds.
    pub fn tile_count(&self) -> usize {
        let width = (self.max_x - self.min_x + 1).max(0) as usize;
        let depth = (self.max_z - self.min_z + 1).max(0) as usize;
        width * depth
    }
}

impl Default for DatasetBounds {
    fn default() -> Self {
        Self::new(MIN_TILE_X, MIN_TILE_Z, MAX_TILE_X, MAX_TILE_Z)
    }
}
