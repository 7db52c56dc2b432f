//! Biome system: definitions, registry, gradient evaluation, classification and
//! the per-world biome grid.
//!
//! Biomes are assigned by evaluating a color gradient at a dedicated noise
//! channel and matching the resulting color against each biome's reference
//! color.

mod classifier;
mod def;
mod gradient;
mod grid;
mod registry;

pub use classifier::{BiomeClassifier, Classification, ClassifierStrategy};
pub use def::{Biome, TileTable};
pub use gradient::{Gradient, GradientKey, GradientMode, Rgb};
pub use grid::{BiomeGrid, ClassificationStats};
pub use registry::{BiomeId, BiomeRegistry, BiomeRegistryError};
