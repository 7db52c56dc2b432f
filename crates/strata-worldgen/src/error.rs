//! Error types for world generation.

use thiserror::Error;

use crate::biome::BiomeRegistryError;
use crate::tile::TileKind;

/// A configuration that cannot be generated. Reported before any generation
/// work starts; the message names the offending parameter.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A world dimension is zero.
    #[error("{parameter} must be greater than zero")]
    ZeroDimension {
        /// Parameter path.
        parameter: &'static str,
    },

    /// The chunk size leaves the world without a single full chunk.
    #[error("chunk_size {chunk_size} must be in 1..={width} (world width)")]
    InvalidChunkSize {
        /// Configured chunk size.
        chunk_size: u32,
        /// Configured world width.
        width: u32,
    },

    /// No biome is configured.
    #[error("biomes must contain at least one biome")]
    NoBiomes,

    /// The biome gradient has no keys.
    #[error("gradient.keys must contain at least one key")]
    EmptyGradient,

    /// A biome name is used twice.
    #[error("biomes: {0}")]
    Biome(String),

    /// A numeric parameter is out of range.
    #[error("{parameter}: {reason}")]
    InvalidParameter {
        /// Parameter path, e.g. `biomes[2].tree_chance`.
        parameter: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A tile name does not exist in the atlas.
    #[error("{parameter}: unknown tile kind '{name}'")]
    UnknownTileKind {
        /// Parameter path, e.g. `ores[1].kind`.
        parameter: String,
        /// The unresolved name.
        name: String,
    },

    /// A required entry of the global tile table is unset.
    #[error("{parameter} is required in the global tile table")]
    MissingTileKind {
        /// Parameter path, e.g. `tiles.stone`.
        parameter: &'static str,
    },

    /// The tallest possible column would not fit in the grid.
    #[error(
        "height_addition + max height_multiplier ({max_height}) must stay below height ({grid_height})"
    )]
    TerrainExceedsGrid {
        /// Tallest possible column.
        max_height: f64,
        /// Grid height.
        grid_height: u32,
    },
}

impl From<BiomeRegistryError> for ConfigError {
    fn from(err: BiomeRegistryError) -> Self {
        Self::Biome(err.to_string())
    }
}

/// A placement that was skipped. Never fatal: the run continues without it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The coordinate already holds a tile.
    #[error("({x}, {y}) is already occupied")]
    Occupied {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },

    /// The column belongs to no chunk.
    #[error("chunk index {chunk} out of bounds (0..{num_chunks}) for x = {x}")]
    OutOfBounds {
        /// Column.
        x: i32,
        /// Computed chunk index.
        chunk: i64,
        /// Number of chunks.
        num_chunks: u32,
    },

    /// The atlas has no variants for the kind.
    #[error("tile kind {kind:?} has no visual variants")]
    MissingTileKind {
        /// The requested kind.
        kind: TileKind,
    },
}
