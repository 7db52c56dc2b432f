//! Per-cell material selection within a terrain column.
//!
//! Walking a column upward from `y = 0`, each cell is stone (possibly
//! overridden by an ore), then dirt, then a single top layer of grass:
//!
//! - `y < height - dirt_layer_height`: stone, unless an ore qualifies
//! - `y < height - 1`: dirt
//! - otherwise: grass

use crate::biome::Biome;
use crate::ore::OreSpec;
use crate::tile::TileKind;

/// Material chosen for one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    /// Base rock.
    Stone,
    /// Ore at this index of the cell's ore list.
    Ore(usize),
    /// Subsurface layer.
    Dirt,
    /// Top layer.
    Grass,
}

/// Classifies the cell at row `y` of a column whose surface is at `height`.
///
/// `ore_hit(n)` reports whether ore mask `n` is set at the cell. Ores are
/// checked in list order and each qualifying ore overwrites the previous
/// choice, so the highest-indexed qualifying ore wins.
pub fn classify_cell(
    y: u32,
    height: f64,
    biome: &Biome,
    ores: &[OreSpec],
    ore_hit: impl Fn(usize) -> bool,
) -> Material {
    let row = y as f64;
    if row < height - biome.dirt_layer_height {
        let mut material = Material::Stone;
        for (index, ore) in ores.iter().enumerate() {
            if ore_hit(index) && ore.deep_enough(y, height) {
                material = Material::Ore(index);
            }
        }
        material
    } else if row < height - 1.0 {
        Material::Dirt
    } else {
        Material::Grass
    }
}

/// Resolves a material to the tile kind it places.
///
/// Returns `None` only for an ore index outside `ores`.
pub fn material_kind(material: Material, biome: &Biome, ores: &[OreSpec]) -> Option<TileKind> {
    match material {
        Material::Stone => Some(biome.tiles.stone),
        Material::Ore(index) => ores.get(index).map(|ore| ore.kind),
        Material::Dirt => Some(biome.tiles.dirt),
        Material::Grass => Some(biome.tiles.grass),
    }
}
