//! Fixtures shared by the unit tests.

use crate::biome::{Biome, Rgb, TileTable};
use crate::config::{BiomeConfig, GradientConfig, GradientKeyConfig, WorldConfig};
use crate::decoration::TreeShape;
use crate::ore::OreSpec;
use crate::tile::{TileAtlas, TileKind, default_tile_atlas};

pub fn test_atlas() -> TileAtlas {
    default_tile_atlas()
}

fn kind(name: &str) -> TileKind {
    test_atlas()
        .lookup_by_name(name)
        .unwrap_or_else(|| panic!("no default tile kind '{name}'"))
}

/// Grassland-like biome with a five-cell dirt layer.
pub fn plain_biome() -> Biome {
    Biome {
        name: "plain".to_string(),
        color: Rgb::new(0.4, 0.8, 0.3),
        tiles: TileTable {
            stone: kind("stone"),
            dirt: kind("dirt"),
            grass: kind("grass"),
            log: kind("log"),
            leaf: kind("leaf"),
            tall_grass: Some(kind("tall_grass")),
        },
        cave_frequency: 0.08,
        terrain_frequency: 0.04,
        surface_value: 0.25,
        height_multiplier: 25.0,
        dirt_layer_height: 5.0,
        generate_caves: true,
        tree_chance: 15,
        min_tree_height: 3,
        max_tree_height: 6,
        tree_shape: TreeShape::Canopy,
        tall_grass_chance: 5,
        ores: None,
    }
}

pub fn ore(name: &str, kind: u16, max_spawn_height: f64) -> OreSpec {
    OreSpec {
        name: name.to_string(),
        kind: TileKind(kind),
        frequency: 0.2,
        size: 0.7,
        max_spawn_height,
    }
}

/// A 64×64 single-biome world with a fixed seed.
pub fn small_config() -> WorldConfig {
    let biome = BiomeConfig::default();
    WorldConfig {
        width: 64,
        height: None,
        chunk_size: 16,
        height_addition: 20.0,
        seed: Some(7),
        gradient: GradientConfig {
            keys: vec![GradientKeyConfig {
                time: 0.5,
                color: biome.color,
            }],
            ..Default::default()
        },
        biomes: vec![biome],
        ..Default::default()
    }
}
