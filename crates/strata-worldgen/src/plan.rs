//! Validation of [`WorldConfig`] into a resolved [`GenerationPlan`].
//!
//! Every configuration inconsistency is caught here, before the builder does
//! any work. Tile names are resolved against the atlas and biome tile tables
//! get their global fallbacks filled in.

use crate::biome::{
    Biome, BiomeRegistry, ClassifierStrategy, Gradient, GradientKey, TileTable,
};
use crate::chunk::ChunkIndex;
use crate::config::{BiomeConfig, OreConfig, TileTableConfig, WorldConfig};
use crate::error::ConfigError;
use crate::mask::{MaskScope, NoiseThreshold};
use crate::ore::OreSpec;
use crate::tile::{TileAtlas, TileKind};

/// A validated configuration with every name resolved.
#[derive(Clone, Debug)]
pub struct GenerationPlan {
    /// World width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Partitioning of the world's columns into chunks.
    pub chunk_index: ChunkIndex,
    /// Constant added to every column height.
    pub height_addition: f64,
    /// Carve caves.
    pub generate_caves: bool,
    /// Configured seed, if any.
    pub seed: Option<u64>,
    /// Biome channel frequency.
    pub biome_frequency: f64,
    /// Mask parameter scope.
    pub mask_scope: MaskScope,
    /// Biome classification strategy.
    pub classifier: ClassifierStrategy,
    /// Cave channel under [`MaskScope::Global`].
    pub cave: NoiseThreshold,
    /// Biome gradient, keys sorted.
    pub gradient: Gradient,
    /// Resolved biomes, in configuration order.
    pub biomes: BiomeRegistry,
    /// Resolved global ore list.
    pub ores: Vec<OreSpec>,
}

impl WorldConfig {
    /// Checks the configuration and resolves it against `atlas`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found; its message names the
    /// offending parameter.
    pub fn validate(&self, atlas: &TileAtlas) -> Result<GenerationPlan, ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroDimension { parameter: "width" });
        }
        let height = self.height.unwrap_or(self.width);
        if height == 0 {
            return Err(ConfigError::ZeroDimension { parameter: "height" });
        }
        let chunk_index = ChunkIndex::new(self.width, self.chunk_size)?;
        if self.biomes.is_empty() {
            return Err(ConfigError::NoBiomes);
        }
        finite("height_addition", self.height_addition)?;
        frequency("biome_frequency", self.biome_frequency)?;
        frequency("cave.frequency", self.cave.frequency)?;
        finite("cave.surface_value", self.cave.surface_value)?;

        for (i, key) in self.gradient.keys.iter().enumerate() {
            if !key.time.is_finite() {
                return Err(invalid(format!("gradient.keys[{i}].time"), "must be finite"));
            }
        }
        let gradient = Gradient::new(
            self.gradient.mode,
            self.gradient
                .keys
                .iter()
                .map(|k| GradientKey {
                    time: k.time,
                    color: k.color,
                })
                .collect(),
        )
        .ok_or(ConfigError::EmptyGradient)?;

        let global = resolve_global_tiles(&self.tiles, atlas)?;
        let ores = self
            .ores
            .iter()
            .enumerate()
            .map(|(i, ore)| resolve_ore(&format!("ores[{i}]"), ore, atlas))
            .collect::<Result<Vec<_>, _>>()?;

        let mut biomes = BiomeRegistry::new();
        for (i, biome) in self.biomes.iter().enumerate() {
            biomes.register(resolve_biome(i, biome, &global, atlas)?)?;
        }

        let max_height = self.height_addition + biomes.max_height_multiplier();
        if max_height >= f64::from(height) {
            return Err(ConfigError::TerrainExceedsGrid {
                max_height,
                grid_height: height,
            });
        }

        Ok(GenerationPlan {
            width: self.width,
            height,
            chunk_index,
            height_addition: self.height_addition,
            generate_caves: self.generate_caves,
            seed: self.seed,
            biome_frequency: self.biome_frequency,
            mask_scope: self.mask_scope,
            classifier: self.classifier,
            cave: NoiseThreshold {
                frequency: self.cave.frequency,
                threshold: self.cave.surface_value,
            },
            gradient,
            biomes,
            ores,
        })
    }
}

fn invalid(parameter: String, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter,
        reason: reason.to_string(),
    }
}

fn finite(parameter: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(parameter.to_string(), "must be finite"))
    }
}

fn frequency(parameter: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(parameter.to_string(), "must be finite and non-negative"))
    }
}

fn lookup(atlas: &TileAtlas, parameter: String, name: &str) -> Result<TileKind, ConfigError> {
    atlas
        .lookup_by_name(name)
        .ok_or_else(|| ConfigError::UnknownTileKind {
            parameter,
            name: name.to_string(),
        })
}

fn required(
    atlas: &TileAtlas,
    parameter: &'static str,
    name: Option<&String>,
) -> Result<TileKind, ConfigError> {
    let name = name.ok_or(ConfigError::MissingTileKind { parameter })?;
    lookup(atlas, parameter.to_string(), name)
}

fn resolve_global_tiles(
    tiles: &TileTableConfig,
    atlas: &TileAtlas,
) -> Result<TileTable, ConfigError> {
    Ok(TileTable {
        stone: required(atlas, "tiles.stone", tiles.stone.as_ref())?,
        dirt: required(atlas, "tiles.dirt", tiles.dirt.as_ref())?,
        grass: required(atlas, "tiles.grass", tiles.grass.as_ref())?,
        log: required(atlas, "tiles.log", tiles.log.as_ref())?,
        leaf: required(atlas, "tiles.leaf", tiles.leaf.as_ref())?,
        tall_grass: tiles
            .tall_grass
            .as_ref()
            .map(|name| lookup(atlas, "tiles.tall_grass".to_string(), name))
            .transpose()?,
    })
}

fn resolve_biome_tiles(
    prefix: &str,
    tiles: &TileTableConfig,
    global: &TileTable,
    atlas: &TileAtlas,
) -> Result<TileTable, ConfigError> {
    let or_global = |field: &str, name: &Option<String>, fallback: TileKind| match name {
        Some(name) => lookup(atlas, format!("{prefix}.tiles.{field}"), name),
        None => Ok(fallback),
    };
    Ok(TileTable {
        stone: or_global("stone", &tiles.stone, global.stone)?,
        dirt: or_global("dirt", &tiles.dirt, global.dirt)?,
        grass: or_global("grass", &tiles.grass, global.grass)?,
        log: or_global("log", &tiles.log, global.log)?,
        leaf: or_global("leaf", &tiles.leaf, global.leaf)?,
        tall_grass: match &tiles.tall_grass {
            Some(name) => Some(lookup(atlas, format!("{prefix}.tiles.tall_grass"), name)?),
            None => global.tall_grass,
        },
    })
}

fn resolve_ore(prefix: &str, ore: &OreConfig, atlas: &TileAtlas) -> Result<OreSpec, ConfigError> {
    frequency(&format!("{prefix}.frequency"), ore.frequency)?;
    finite(&format!("{prefix}.size"), ore.size)?;
    finite(&format!("{prefix}.max_spawn_height"), ore.max_spawn_height)?;
    Ok(OreSpec {
        name: ore.name.clone(),
        kind: lookup(atlas, format!("{prefix}.kind"), &ore.kind)?,
        frequency: ore.frequency,
        size: ore.size,
        max_spawn_height: ore.max_spawn_height,
    })
}

fn resolve_biome(
    index: usize,
    biome: &BiomeConfig,
    global: &TileTable,
    atlas: &TileAtlas,
) -> Result<Biome, ConfigError> {
    let prefix = format!("biomes[{index}]");
    let param = |field: &str| format!("{prefix}.{field}");

    frequency(&param("cave_frequency"), biome.cave_frequency)?;
    frequency(&param("terrain_frequency"), biome.terrain_frequency)?;
    finite(&param("surface_value"), biome.surface_value)?;
    if !biome.height_multiplier.is_finite() || biome.height_multiplier < 0.0 {
        return Err(invalid(param("height_multiplier"), "must be finite and non-negative"));
    }
    if biome.tree_chance == 0 {
        return Err(invalid(param("tree_chance"), "must be at least 1"));
    }
    if biome.tall_grass_chance == 0 {
        return Err(invalid(param("tall_grass_chance"), "must be at least 1"));
    }
    if biome.min_tree_height > biome.max_tree_height {
        return Err(invalid(
            param("min_tree_height"),
            "must not exceed max_tree_height",
        ));
    }

    let ores = biome
        .ores
        .as_ref()
        .map(|ores| {
            ores.iter()
                .enumerate()
                .map(|(i, ore)| resolve_ore(&format!("{prefix}.ores[{i}]"), ore, atlas))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(Biome {
        name: biome.name.clone(),
        color: biome.color,
        tiles: resolve_biome_tiles(&prefix, &biome.tiles, global, atlas)?,
        cave_frequency: biome.cave_frequency,
        terrain_frequency: biome.terrain_frequency,
        surface_value: biome.surface_value,
        height_multiplier: biome.height_multiplier,
        dirt_layer_height: f64::from(biome.dirt_layer_height),
        generate_caves: biome.generate_caves,
        tree_chance: biome.tree_chance,
        min_tree_height: biome.min_tree_height,
        max_tree_height: biome.max_tree_height,
        tree_shape: biome.tree_shape,
        tall_grass_chance: biome.tall_grass_chance,
        ores,
    })
}
