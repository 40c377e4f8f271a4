//! Coordinate mapping module
//!
//! Converts global world coordinates into dataset tile positions and the
//! sample offset inside a tile.

mod types;

pub use types::{
    DatasetBounds, LocalIndex, TilePosition, MAX_TILE_X, MAX_TILE_Z, MIN_TILE_X, MIN_TILE_Z,
    REGION_SPAN, SAMPLE_SCALE, TILE_SIZE,
};

/// Returns the tile containing world coordinate `(x, z)`.
///
/// Uses floor division, so `x = -1` lands in tile `-1` rather than `0`.
#[inline]
pub fn tile_position(x: i32, z: i32) -> TilePosition {
    TilePosition {
        tile_x: x.div_euclid(REGION_SPAN),
        tile_z: z.div_euclid(REGION_SPAN),
    }
}

/// Returns the sample offset of world coordinate `(x, z)` inside `pos`.
///
/// Coordinates outside the tile are clamped to its edge.
#[inline]
pub fn local_index(x: i32, z: i32, pos: TilePosition) -> LocalIndex {
    LocalIndex {
        x: axis_index(x as i64 - pos.min_x()),
        z: axis_index(z as i64 - pos.min_z()),
    }
}

/// Tile position and local index for a world coordinate in one step.
#[inline]
pub fn locate(x: i32, z: i32) -> (TilePosition, LocalIndex) {
    let pos = tile_position(x, z);
    (pos, local_index(x, z, pos))
}

fn axis_index(offset: i64) -> usize {
    offset
        .div_euclid(SAMPLE_SCALE as i64)
        .clamp(0, TILE_SIZE as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_origin_maps_to_tile_zero() {
        let pos = tile_position(0, 0);
        assert_eq!(pos, TilePosition::new(0, 0));
        assert_eq!(local_index(0, 0, pos), LocalIndex { x: 0, z: 0 });
    }

    #[test]
    fn test_negative_one_maps_to_tile_minus_one() {
        let pos = tile_position(-1, 0);
        assert_eq!(pos.tile_x, -1);
        assert_eq!(pos.tile_z, 0);

        let local = local_index(-1, 0, pos);
        assert_eq!(local.x, TILE_SIZE - 1);
        assert_eq!(local.z, 0);
    }

    #[test]
    fn test_tile_edges() {
        assert_eq!(tile_position(REGION_SPAN - 1, 0).tile_x, 0);
        assert_eq!(tile_position(REGION_SPAN, 0).tile_x, 1);
        assert_eq!(tile_position(-REGION_SPAN, 0).tile_x, -1);
        assert_eq!(tile_position(-REGION_SPAN - 1, 0).tile_x, -2);
    }

    #[test]
    fn test_local_index_uses_sample_scale() {
        let pos = TilePosition::new(1, -1);
        let x = REGION_SPAN + 25;
        let z = -REGION_SPAN + 99;
        assert_eq!(local_index(x, z, pos), LocalIndex { x: 2, z: 9 });
    }

    #[test]
    fn test_local_index_clamps_outside_tile() {
        let pos = TilePosition::new(0, 0);
        assert_eq!(local_index(-5, REGION_SPAN * 2, pos), LocalIndex { x: 0, z: TILE_SIZE - 1 });
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let (pos, local) = locate(i32::MIN, i32::MAX);
        assert!(pos.min_x() <= i32::MIN as i64);
        assert!(local.x < TILE_SIZE);
        assert!(local.z < TILE_SIZE);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(TilePosition::new(3, -7).file_name(), "f_3_-7_.txt");
        assert_eq!(TilePosition::new(0, 0).file_name(), "f_0_0_.txt");
    }

    #[test]
    fn test_min_coordinates() {
        let pos = TilePosition::new(-2, 3);
        assert_eq!(pos.min_x(), -2 * REGION_SPAN as i64);
        assert_eq!(pos.min_z(), 3 * REGION_SPAN as i64);
    }

    #[test]
    fn test_offset_is_row_major() {
        let local = LocalIndex { x: 3, z: 2 };
        assert_eq!(local.offset(), 3 + 2 * TILE_SIZE);
    }

    #[test]
    fn test_default_bounds_cover_reference_grid() {
        let bounds = DatasetBounds::default();
        assert_eq!(bounds.tile_count(), 52 * 23);
        assert!(bounds.contains(TilePosition::new(0, 0)));
        assert!(bounds.contains(TilePosition::new(MIN_TILE_X, MIN_TILE_Z)));
        assert!(bounds.contains(TilePosition::new(MAX_TILE_X, MAX_TILE_Z)));
        assert!(!bounds.contains(TilePosition::new(MAX_TILE_X + 1, 0)));
        assert!(!bounds.contains(TilePosition::new(0, MIN_TILE_Z - 1)));
    }

    proptest! {
        /// Property: shifting X by whole tiles shifts the tile index by exactly that many tiles.
        #[test]
        fn prop_tiling_is_translation_consistent(
            x in -50_000_000i32..50_000_000i32,
            z in -50_000_000i32..50_000_000i32,
            k in -40i32..40i32,
        ) {
            let base = tile_position(x, z);
            let shifted = tile_position(x + k * REGION_SPAN, z);
            prop_assert_eq!(shifted.tile_x - base.tile_x, k);
            prop_assert_eq!(shifted.tile_z, base.tile_z);
        }

        /// Property: the containing tile always covers the coordinate.
        #[test]
        fn prop_tile_contains_coordinate(x in any::<i32>(), z in any::<i32>()) {
            let pos = tile_position(x, z);
            prop_assert!(pos.min_x() <= x as i64);
            prop_assert!((x as i64) < pos.min_x() + REGION_SPAN as i64);
            prop_assert!(pos.min_z() <= z as i64);
            prop_assert!((z as i64) < pos.min_z() + REGION_SPAN as i64);
        }

        /// Property: negative coordinates use floor semantics.
        #[test]
        fn prop_negative_coordinates_floor(x in i32::MIN..0i32) {
            prop_assert!(tile_position(x, 0).tile_x < 0);
        }

        /// Property: local index is in range and matches the sample scale.
        #[test]
        fn prop_local_index_in_range(x in any::<i32>(), z in any::<i32>()) {
            let (pos, local) = locate(x, z);
            prop_assert!(local.x < TILE_SIZE);
            prop_assert!(local.z < TILE_SIZE);
            prop_assert_eq!(local.x as i64, (x as i64 - pos.min_x()) / SAMPLE_SCALE as i64);
        }
    }
}
