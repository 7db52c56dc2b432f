//! Generation parameters with sensible defaults.
//!
//! These are the serializable, name-based settings an embedder edits. They are
//! validated and resolved against a [`TileAtlas`](crate::TileAtlas) into a
//! [`GenerationPlan`](crate::GenerationPlan) before any generation work starts.

use serde::{Deserialize, Serialize};

use crate::biome::{ClassifierStrategy, GradientMode, Rgb};
use crate::decoration::TreeShape;
use crate::mask::MaskScope;

/// Top-level world generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in cells.
    pub width: u32,
    /// Height of the biome grid and masks in cells. `None` makes the grid
    /// square.
    pub height: Option<u32>,
    /// Cells per chunk along x.
    pub chunk_size: u32,
    /// Constant added to every column height.
    pub height_addition: f64,
    /// Carve caves using the cave mask.
    pub generate_caves: bool,
    /// World seed. `None` draws a random seed when the builder is created.
    pub seed: Option<u64>,
    /// Frequency of the biome noise channel.
    pub biome_frequency: f64,
    /// Whether masks use one threshold for the whole grid or the cell's biome.
    pub mask_scope: MaskScope,
    /// Biome classification strategy.
    pub classifier: ClassifierStrategy,
    /// Cave noise used when `mask_scope` is [`MaskScope::Global`].
    pub cave: CaveConfig,
    /// Gradient the biome noise is evaluated through.
    pub gradient: GradientConfig,
    /// Global tile table. Biomes fall back to it for kinds they don't name.
    pub tiles: TileTableConfig,
    /// Biomes available to the classifier.
    pub biomes: Vec<BiomeConfig>,
    /// Global ordered ore list. Later entries override earlier ones.
    pub ores: Vec<OreConfig>,
}

/// Global cave noise parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaveConfig {
    /// Noise frequency.
    pub frequency: f64,
    /// Cells whose noise exceeds this value keep their rock.
    pub surface_value: f64,
}

/// A color key of the biome gradient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GradientKeyConfig {
    /// Position of the key in `[0, 1]`.
    pub time: f32,
    /// Color at that position.
    pub color: Rgb,
}

/// Biome gradient parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GradientConfig {
    /// Interpolation mode between keys.
    pub mode: GradientMode,
    /// Color keys; sorted by time during validation.
    pub keys: Vec<GradientKeyConfig>,
}

/// Tile kinds by name. `None` entries fall back to the global table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TileTableConfig {
    /// Deep rock.
    pub stone: Option<String>,
    /// Layer between rock and surface.
    pub dirt: Option<String>,
    /// Top layer.
    pub grass: Option<String>,
    /// Tree trunk (or cactus body).
    pub log: Option<String>,
    /// Tree canopy.
    pub leaf: Option<String>,
    /// Optional surface decoration.
    pub tall_grass: Option<String>,
}

/// One biome's generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeConfig {
    /// Unique biome name.
    pub name: String,
    /// Reference color the classifier matches gradient output against.
    pub color: Rgb,
    /// Biome-specific tile kinds.
    pub tiles: TileTableConfig,
    /// Cave noise frequency when masks are per-biome.
    pub cave_frequency: f64,
    /// Terrain height noise frequency.
    pub terrain_frequency: f64,
    /// Cave threshold when masks are per-biome.
    pub surface_value: f64,
    /// Scale applied to the terrain noise.
    pub height_multiplier: f64,
    /// Depth of the dirt layer below the surface.
    pub dirt_layer_height: u32,
    /// Cells of this biome honor the cave mask.
    pub generate_caves: bool,
    /// Trees spawn on a `1` drawn from `[0, tree_chance)`.
    pub tree_chance: u32,
    /// Shortest trunk.
    pub min_tree_height: u32,
    /// Tallest trunk (inclusive).
    pub max_tree_height: u32,
    /// Shape placed when a tree spawns.
    pub tree_shape: TreeShape,
    /// Tall grass spawns on a `1` drawn from `[0, tall_grass_chance)`.
    pub tall_grass_chance: u32,
    /// Biome-specific ordered ore list used when masks are per-biome.
    pub ores: Option<Vec<OreConfig>>,
}

/// One ore's parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OreConfig {
    /// Ore name, used in diagnostics.
    pub name: String,
    /// Tile kind placed for this ore.
    pub kind: String,
    /// Noise frequency.
    pub frequency: f64,
    /// Cells whose noise exceeds this value hold ore.
    pub size: f64,
    /// Ore only appears deeper than this below the column surface.
    pub max_spawn_height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: None,
            chunk_size: 16,
            height_addition: 25.0,
            generate_caves: true,
            seed: None,
            biome_frequency: 0.02,
            mask_scope: MaskScope::PerBiome,
            classifier: ClassifierStrategy::default(),
            cave: CaveConfig::default(),
            gradient: GradientConfig::default(),
            tiles: TileTableConfig::global_defaults(),
            biomes: default_biomes(),
            ores: default_ores(),
        }
    }
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            frequency: 0.08,
            surface_value: 0.25,
        }
    }
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            mode: GradientMode::Blend,
            keys: default_biomes()
                .iter()
                .zip([0.3, 0.45, 0.6, 0.72])
                .map(|(biome, time)| GradientKeyConfig {
                    time,
                    color: biome.color,
                })
                .collect(),
        }
    }
}

impl TileTableConfig {
    /// The global table used by the default content.
    pub fn global_defaults() -> Self {
        Self {
            stone: Some("stone".to_string()),
            dirt: Some("dirt".to_string()),
            grass: Some("grass".to_string()),
            log: Some("log".to_string()),
            leaf: Some("leaf".to_string()),
            tall_grass: Some("tall_grass".to_string()),
        }
    }
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            name: "grassland".to_string(),
            color: Rgb::new(0.4, 0.8, 0.3),
            tiles: TileTableConfig::default(),
            cave_frequency: 0.08,
            terrain_frequency: 0.04,
            surface_value: 0.25,
            height_multiplier: 25.0,
            dirt_layer_height: 5,
            generate_caves: true,
            tree_chance: 15,
            min_tree_height: 3,
            max_tree_height: 6,
            tree_shape: TreeShape::Canopy,
            tall_grass_chance: 5,
            ores: None,
        }
    }
}

impl Default for OreConfig {
    fn default() -> Self {
        Self {
            name: "coal".to_string(),
            kind: "coal".to_string(),
            frequency: 0.2,
            size: 0.72,
            max_spawn_height: 10.0,
        }
    }
}

/// Desert, grassland, forest and snow, in gradient order.
pub fn default_biomes() -> Vec<BiomeConfig> {
    vec![
        BiomeConfig {
            name: "desert".to_string(),
            color: Rgb::new(0.93, 0.79, 0.41),
            tiles: TileTableConfig {
                stone: Some("sandstone".to_string()),
                dirt: Some("sand".to_string()),
                grass: Some("sand".to_string()),
                log: Some("cactus".to_string()),
                leaf: None,
                tall_grass: None,
            },
            surface_value: 0.3,
            height_multiplier: 10.0,
            dirt_layer_height: 8,
            tree_chance: 20,
            min_tree_height: 2,
            max_tree_height: 4,
            tree_shape: TreeShape::Cactus,
            tall_grass_chance: 1,
            ..Default::default()
        },
        BiomeConfig::default(),
        BiomeConfig {
            name: "forest".to_string(),
            color: Rgb::new(0.1, 0.5, 0.15),
            height_multiplier: 30.0,
            tree_chance: 6,
            min_tree_height: 4,
            max_tree_height: 7,
            tall_grass_chance: 3,
            ..Default::default()
        },
        BiomeConfig {
            name: "snow".to_string(),
            color: Rgb::new(0.95, 0.97, 1.0),
            tiles: TileTableConfig {
                grass: Some("snow".to_string()),
                tall_grass: None,
                ..Default::default()
            },
            terrain_frequency: 0.05,
            surface_value: 0.2,
            height_multiplier: 35.0,
            dirt_layer_height: 3,
            tree_chance: 25,
            tall_grass_chance: 1,
            ..Default::default()
        },
    ]
}

/// Coal, iron, gold and diamond, from common and shallow to rare and deep.
pub fn default_ores() -> Vec<OreConfig> {
    vec![
        OreConfig::default(),
        OreConfig {
            name: "iron".to_string(),
            kind: "iron".to_string(),
            frequency: 0.18,
            size: 0.75,
            max_spawn_height: 15.0,
        },
        OreConfig {
            name: "gold".to_string(),
            kind: "gold".to_string(),
            frequency: 0.22,
            size: 0.8,
            max_spawn_height: 22.0,
        },
        OreConfig {
            name: "diamond".to_string(),
            kind: "diamond".to_string(),
            frequency: 0.25,
            size: 0.84,
            max_spawn_height: 30.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gradient_keys_match_biome_colors() {
        let config = WorldConfig::default();
        assert_eq!(config.gradient.keys.len(), config.biomes.len());
        for (key, biome) in config.gradient.keys.iter().zip(&config.biomes) {
            assert_eq!(key.color, biome.color, "key for '{}' has the wrong color", biome.name);
        }
    }

    #[test]
    fn test_world_config_ron_roundtrip() {
        let config = WorldConfig {
            seed: Some(99),
            ..Default::default()
        };
        let ron_str = ron::to_string(&config).unwrap();
        let back: WorldConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_unset_height_stays_unset() {
        let config: WorldConfig = ron::from_str("(width: 256)").unwrap();
        assert_eq!(config.width, 256);
        assert_eq!(config.height, None);
    }

    #[test]
    fn test_partial_biome_uses_defaults() {
        let biome: BiomeConfig = ron::from_str("(name: \"tundra\", tree_chance: 40)").unwrap();
        assert_eq!(biome.name, "tundra");
        assert_eq!(biome.tree_chance, 40);
        assert_eq!(biome.dirt_layer_height, BiomeConfig::default().dirt_layer_height);
    }
}
