//! Per-column terrain surface height.

use crate::biome::Biome;
use crate::noise_field::NoiseField;

/// Computes column heights from the shared noise field.
pub struct HeightProfile<'a> {
    field: &'a NoiseField,
    height_addition: f64,
}

impl<'a> HeightProfile<'a> {
    /// A profile that lifts every column by `height_addition`.
    pub fn new(field: &'a NoiseField, height_addition: f64) -> Self {
        Self {
            field,
            height_addition,
        }
    }

    /// Continuous surface height of column `x` under `biome`:
    /// `noise(x, terrain_frequency) * height_multiplier + height_addition`.
    pub fn height_at(&self, x: u32, biome: &Biome) -> f64 {
        self.field.sample_1d(x as f64, biome.terrain_frequency) * biome.height_multiplier
            + self.height_addition
    }
}

/// Highest row a column of the given height fills.
///
/// Rows run `0..=floor(height)`: the fractional top counts as a row. Columns
/// with negative (or NaN) height are empty.
pub fn top_row(height: f64) -> Option<u32> {
    if height >= 0.0 {
        Some(height.floor() as u32)
    } else {
        None
    }
}
