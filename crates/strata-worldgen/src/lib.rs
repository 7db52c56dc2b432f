//! Procedural 2D tile-world generation: coherent noise, biome classification,
//! cave and ore masks, layered columns, decorations and chunked placement.
//!
//! The usual entry point is [`WorldBuilder`]:
//!
//! ```no_run
//! use strata_worldgen::{WorldBuilder, WorldConfig, default_tile_atlas};
//!
//! let config = WorldConfig { seed: Some(42), ..Default::default() };
//! let mut builder = WorldBuilder::new(&config, default_tile_atlas())?;
//! let world = builder.generate();
//! println!("{} tiles in {} chunks", world.placement_count(), world.chunks().len());
//! # Ok::<(), strata_worldgen::ConfigError>(())
//! ```

mod builder;
mod chunk;
mod column;
mod config;
mod decoration;
mod error;
mod height;
mod mask;
mod noise_field;
mod ore;
mod placement;
mod plan;
mod seed;
mod tile;
mod world;

pub mod biome;
pub mod debug_viz;

#[cfg(test)]
mod test_support;

pub use biome::{
    Biome, BiomeClassifier, BiomeGrid, BiomeId, BiomeRegistry, BiomeRegistryError,
    Classification, ClassifierStrategy, Gradient, GradientKey, GradientMode, Rgb, TileTable,
};
pub use builder::{BuildStage, WorldBuilder};
pub use chunk::{Chunk, ChunkId, ChunkIndex, TilePlacement};
pub use column::{Material, classify_cell, material_kind};
pub use config::{
    BiomeConfig, CaveConfig, GradientConfig, GradientKeyConfig, OreConfig, TileTableConfig,
    WorldConfig, default_biomes, default_ores,
};
pub use decoration::{CANOPY_OFFSETS, DecorationRoll, TreeShape, decorate_column, grow_tree};
pub use error::{ConfigError, PlacementError};
pub use height::{HeightProfile, top_row};
pub use mask::{
    BiomeCaveThresholds, BiomeOreThresholds, Mask, MaskGenerator, MaskScope, NoiseThreshold,
    ThresholdSource, WorldMasks, build_mask,
};
pub use noise_field::{NoiseField, OFFSET_RANGE};
pub use ore::OreSpec;
pub use placement::WorldTiles;
pub use plan::GenerationPlan;
pub use seed::{
    NOISE_OFFSET_STREAM, NOISE_PERMUTATION_STREAM, PLACEMENT_STREAM, derive_stream_seed,
    resolve_seed, stream_rng,
};
pub use tile::{AtlasError, TileAtlas, TileKind, TileKindDef, default_tile_atlas, default_tile_kinds};
pub use world::{GeneratedWorld, GenerationStats};
