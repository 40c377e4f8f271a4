//! Immutable dataset tile.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::classify::{classify, Category};
use crate::coord::{LocalIndex, TILE_SIZE};
use crate::raster::RasterError;

/// Number of samples in a tile.
pub const TILE_SAMPLES: usize = TILE_SIZE * TILE_SIZE;

/// Square grid of raw classification codes, one byte per sample.
///
/// A tile that failed to load is represented by an all-zero grid, which
/// classifies as [`Category::NoData`] everywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct Tile {
    samples: Box<[u8]>,
    loaded: bool,
}

impl Tile {
    /// Wraps decoded samples. The buffer must hold exactly [`TILE_SAMPLES`] bytes.
    pub fn from_samples(samples: Vec<u8>) -> Result<Self, RasterError> {
        if samples.len() != TILE_SAMPLES {
            return Err(RasterError::Truncated {
                actual: samples.len(),
                expected: TILE_SAMPLES,
            });
        }
        Ok(Self {
            samples: samples.into_boxed_slice(),
            loaded: true,
        })
    }

    /// Creates the all-zero tile used when no data could be loaded.
    pub fn empty() -> Self {
        Self {
            samples: vec![0; TILE_SAMPLES].into_boxed_slice(),
            loaded: false,
        }
    }

    /// Shared instance of [`Tile::empty`].
    pub fn shared_empty() -> Arc<Tile> {
        static EMPTY: OnceLock<Arc<Tile>> = OnceLock::new();
        Arc::clone(EMPTY.get_or_init(|| Arc::new(Tile::empty())))
    }

    /// Raw code at `local`.
    #[inline]
    pub fn code(&self, local: LocalIndex) -> u8 {
        self.samples[local.offset()]
    }

    /// Category at `local`.
    #[inline]
    pub fn category(&self, local: LocalIndex) -> Category {
        classify(self.code(local))
    }

    /// Raw samples in row-major order.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Returns true if the tile holds decoded data rather than the empty fallback.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("samples", &self.samples.len())
            .field("loaded", &self.loaded)
            .finish()
    }
}
