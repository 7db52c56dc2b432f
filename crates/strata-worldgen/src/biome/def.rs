//! Resolved biome definition used during generation.

use super::Rgb;
use crate::decoration::TreeShape;
use crate::ore::OreSpec;
use crate::tile::TileKind;

/// Tile kinds a biome's cells and decorations are built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileTable {
    /// Deep rock.
    pub stone: TileKind,
    /// Layer between rock and surface.
    pub dirt: TileKind,
    /// Top layer.
    pub grass: TileKind,
    /// Tree trunk (or cactus body).
    pub log: TileKind,
    /// Tree canopy.
    pub leaf: TileKind,
    /// Surface decoration; `None` disables tall grass for the biome.
    pub tall_grass: Option<TileKind>,
}

/// Full descriptor for a biome, with tile names already resolved.
#[derive(Clone, Debug)]
pub struct Biome {
    /// Human-readable biome name (e.g., "desert").
    pub name: String,
    /// Reference color used for classification.
    pub color: Rgb,
    /// Tile kinds, with global fallbacks applied.
    pub tiles: TileTable,
    /// Cave noise frequency for per-biome masks.
    pub cave_frequency: f64,
    /// Terrain height noise frequency.
    pub terrain_frequency: f64,
    /// Cave threshold for per-biome masks.
    pub surface_value: f64,
    /// Scale applied to the terrain noise.
    pub height_multiplier: f64,
    /// Depth of the dirt layer below the surface.
    pub dirt_layer_height: f64,
    /// Whether cells of this biome honor the cave mask.
    pub generate_caves: bool,
    /// Upper bound (exclusive) of the tree draw.
    pub tree_chance: u32,
    /// Shortest trunk.
    pub min_tree_height: u32,
    /// Tallest trunk (inclusive).
    pub max_tree_height: u32,
    /// Shape placed when a tree spawns.
    pub tree_shape: TreeShape,
    /// Upper bound (exclusive) of the tall grass draw.
    pub tall_grass_chance: u32,
    /// Biome-specific ordered ore list, if any.
    pub ores: Option<Vec<OreSpec>>,
}

impl Biome {
    /// The ore list this biome's cells are classified with: its own list when it
    /// has one, `global` otherwise.
    pub fn ores_or<'a>(&'a self, global: &'a [OreSpec]) -> &'a [OreSpec] {
        self.ores.as_deref().unwrap_or(global)
    }
}
