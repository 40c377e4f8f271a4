//! Land-cover classification table.
//!
//! Maps the raw codes stored in dataset tiles to the closed set of
//! [`Category`] values. Every unknown code, including the `0` sentinel of
//! empty tiles, classifies as [`Category::NoData`].

use std::fmt;

use serde::Serialize;

/// Semantic land-cover category of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    IrrigatedCrops,
    RainfedCrops,
    CroplandWithVegetation,
    VegetationWithCropland,
    BroadleafEvergreen,
    ClosedBroadleafDeciduous,
    OpenBroadleafDeciduous,
    ClosedNeedleleafEvergreen,
    OpenNeedleleaf,
    MixedBroadNeedleleaf,
    ForestShrublandWithGrass,
    GrassWithForestShrubland,
    Shrubland,
    Grassland,
    SparseVegetation,
    FreshFloodedForest,
    SalineFloodedForest,
    FloodedGrassland,
    Urban,
    Bare,
    Water,
    Snow,
    NoData,
}

/// Coarse terrain family a category feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Plains,
    Forest,
    Desert,
    Swamp,
    River,
    IcePlains,
}

impl Category {
    /// All categories in table order.
    pub const ALL: [Category; 23] = [
        Category::IrrigatedCrops,
        Category::RainfedCrops,
        Category::CroplandWithVegetation,
        Category::VegetationWithCropland,
        Category::BroadleafEvergreen,
        Category::ClosedBroadleafDeciduous,
        Category::OpenBroadleafDeciduous,
        Category::ClosedNeedleleafEvergreen,
        Category::OpenNeedleleaf,
        Category::MixedBroadNeedleleaf,
        Category::ForestShrublandWithGrass,
        Category::GrassWithForestShrubland,
        Category::Shrubland,
        Category::Grassland,
        Category::SparseVegetation,
        Category::FreshFloodedForest,
        Category::SalineFloodedForest,
        Category::FloodedGrassland,
        Category::Urban,
        Category::Bare,
        Category::Water,
        Category::Snow,
        Category::NoData,
    ];

    /// Raw dataset code for this category, `None` for [`Category::NoData`].
    pub fn code(self) -> Option<u8> {
        let code = match self {
            Category::IrrigatedCrops => 11,
            Category::RainfedCrops => 14,
            Category::CroplandWithVegetation => 20,
            Category::VegetationWithCropland => 30,
            Category::BroadleafEvergreen => 40,
            Category::ClosedBroadleafDeciduous => 50,
            Category::OpenBroadleafDeciduous => 60,
            Category::ClosedNeedleleafEvergreen => 70,
            Category::OpenNeedleleaf => 90,
            Category::MixedBroadNeedleleaf => 100,
            Category::ForestShrublandWithGrass => 110,
            Category::GrassWithForestShrubland => 120,
            Category::Shrubland => 130,
            Category::Grassland => 140,
            Category::SparseVegetation => 150,
            Category::FreshFloodedForest => 160,
            Category::SalineFloodedForest => 170,
            Category::FloodedGrassland => 180,
            Category::Urban => 190,
            Category::Bare => 200,
            Category::Water => 210,
            Category::Snow => 220,
            Category::NoData => return None,
        };
        Some(code)
    }

    /// Terrain family this category is generated as.
    pub fn terrain(self) -> TerrainKind {
        match self {
            Category::IrrigatedCrops
            | Category::RainfedCrops
            | Category::CroplandWithVegetation
            | Category::VegetationWithCropland
            | Category::GrassWithForestShrubland
            | Category::Grassland
            | Category::Urban
            | Category::NoData => TerrainKind::Plains,
            Category::BroadleafEvergreen
            | Category::ClosedBroadleafDeciduous
            | Category::OpenBroadleafDeciduous
            | Category::ClosedNeedleleafEvergreen
            | Category::OpenNeedleleaf
            | Category::MixedBroadNeedleleaf
            | Category::ForestShrublandWithGrass => TerrainKind::Forest,
            Category::Shrubland | Category::SparseVegetation | Category::Bare => {
                TerrainKind::Desert
            }
            Category::FreshFloodedForest
            | Category::SalineFloodedForest
            | Category::FloodedGrassland => TerrainKind::Swamp,
            Category::Water => TerrainKind::River,
            Category::Snow => TerrainKind::IcePlains,
        }
    }

    /// Upper snake case name, matching the dataset legend.
    pub fn name(self) -> &'static str {
        match self {
            Category::IrrigatedCrops => "IRRIGATED_CROPS",
            Category::RainfedCrops => "RAINFED_CROPS",
            Category::CroplandWithVegetation => "CROPLAND_WITH_VEGETATION",
            Category::VegetationWithCropland => "VEGETATION_WITH_CROPLAND",
            Category::BroadleafEvergreen => "BROADLEAF_EVERGREEN",
            Category::ClosedBroadleafDeciduous => "CLOSED_BROADLEAF_DECIDUOUS",
            Category::OpenBroadleafDeciduous => "OPEN_BROADLEAF_DECIDUOUS",
            Category::ClosedNeedleleafEvergreen => "CLOSED_NEEDLELEAF_EVERGREEN",
            Category::OpenNeedleleaf => "OPEN_NEEDLELEAF",
            Category::MixedBroadNeedleleaf => "MIXED_BROAD_NEEDLELEAF",
            Category::ForestShrublandWithGrass => "FOREST_SHRUBLAND_WITH_GRASS",
            Category::GrassWithForestShrubland => "GRASS_WITH_FOREST_SHRUBLAND",
            Category::Shrubland => "SHRUBLAND",
            Category::Grassland => "GRASSLAND",
            Category::SparseVegetation => "SPARSE_VEGETATION",
            Category::FreshFloodedForest => "FRESH_FLOODED_FOREST",
            Category::SalineFloodedForest => "SALINE_FLOODED_FOREST",
            Category::FloodedGrassland => "FLOODED_GRASSLAND",
            Category::Urban => "URBAN",
            Category::Bare => "BARE",
            Category::Water => "WATER",
            Category::Snow => "SNOW",
            Category::NoData => "NO_DATA",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerrainKind::Plains => "plains",
            TerrainKind::Forest => "forest",
            TerrainKind::Desert => "desert",
            TerrainKind::Swamp => "swamp",
            TerrainKind::River => "river",
            TerrainKind::IcePlains => "ice_plains",
        };
        f.write_str(name)
    }
}

/// Classifies a raw dataset code.
#[inline]
pub fn classify(code: u8) -> Category {
    match code {
        11 => Category::IrrigatedCrops,
        14 => Category::RainfedCrops,
        20 => Category::CroplandWithVegetation,
        30 => Category::VegetationWithCropland,
        40 => Category::BroadleafEvergreen,
        50 => Category::ClosedBroadleafDeciduous,
        60 => Category::OpenBroadleafDeciduous,
        70 => Category::ClosedNeedleleafEvergreen,
        90 => Category::OpenNeedleleaf,
        100 => Category::MixedBroadNeedleleaf,
        110 => Category::ForestShrublandWithGrass,
        120 => Category::GrassWithForestShrubland,
        130 => Category::Shrubland,
        140 => Category::Grassland,
        150 => Category::SparseVegetation,
        160 => Category::FreshFloodedForest,
        170 => Category::SalineFloodedForest,
        180 => Category::FloodedGrassland,
        190 => Category::Urban,
        200 => Category::Bare,
        210 => Category::Water,
        220 => Category::Snow,
        _ => Category::NoData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [(u8, Category); 22] = [
        (11, Category::IrrigatedCrops),
        (14, Category::RainfedCrops),
        (20, Category::CroplandWithVegetation),
        (30, Category::VegetationWithCropland),
        (40, Category::BroadleafEvergreen),
        (50, Category::ClosedBroadleafDeciduous),
        (60, Category::OpenBroadleafDeciduous),
        (70, Category::ClosedNeedleleafEvergreen),
        (90, Category::OpenNeedleleaf),
        (100, Category::MixedBroadNeedleleaf),
        (110, Category::ForestShrublandWithGrass),
        (120, Category::GrassWithForestShrubland),
        (130, Category::Shrubland),
        (140, Category::Grassland),
        (150, Category::SparseVegetation),
        (160, Category::FreshFloodedForest),
        (170, Category::SalineFloodedForest),
        (180, Category::FloodedGrassland),
        (190, Category::Urban),
        (200, Category::Bare),
        (210, Category::Water),
        (220, Category::Snow),
    ];

    #[test]
    fn test_known_codes() {
        for (code, expected) in KNOWN {
            assert_eq!(classify(code), expected, "code {}", code);
        }
    }

    #[test]
    fn test_unknown_codes_are_no_data() {
        let known: Vec<u8> = KNOWN.iter().map(|(code, _)| *code).collect();
        for code in 0..=u8::MAX {
            if !known.contains(&code) {
                assert_eq!(classify(code), Category::NoData, "code {}", code);
            }
        }
        assert_eq!(classify(0), Category::NoData);
    }

    #[test]
    fn test_code_inverts_classify() {
        for category in Category::ALL {
            match category.code() {
                Some(code) => assert_eq!(classify(code), category),
                None => assert_eq!(category, Category::NoData),
            }
        }
    }

    #[test]
    fn test_all_has_every_category_once() {
        let mut seen = std::collections::HashSet::new();
        for category in Category::ALL {
            assert!(seen.insert(category));
        }
        assert_eq!(seen.len(), 23);
    }

    #[test]
    fn test_terrain_families() {
        assert_eq!(Category::Grassland.terrain(), TerrainKind::Plains);
        assert_eq!(Category::OpenNeedleleaf.terrain(), TerrainKind::Forest);
        assert_eq!(Category::Bare.terrain(), TerrainKind::Desert);
        assert_eq!(Category::FloodedGrassland.terrain(), TerrainKind::Swamp);
        assert_eq!(Category::Water.terrain(), TerrainKind::River);
        assert_eq!(Category::Snow.terrain(), TerrainKind::IcePlains);
        assert_eq!(Category::NoData.terrain(), TerrainKind::Plains);
    }

    #[test]
    fn test_display_matches_legend() {
        assert_eq!(Category::Grassland.to_string(), "GRASSLAND");
        assert_eq!(Category::NoData.to_string(), "NO_DATA");
        assert_eq!(TerrainKind::IcePlains.to_string(), "ice_plains");
    }

    #[test]
    fn test_serialize_uses_legend_names() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
        }
    }
}
