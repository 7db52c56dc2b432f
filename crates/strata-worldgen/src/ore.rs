//! Ore definitions.
//!
//! Ores form an ordered list. The same list drives mask generation (one mask
//! per entry) and the classifier's precedence: when several ores qualify at a
//! cell, the one with the highest index wins.

use crate::mask::NoiseThreshold;
use crate::tile::TileKind;

/// One resolved ore type.
#[derive(Clone, Debug, PartialEq)]
pub struct OreSpec {
    /// Human-readable name for logging/debugging.
    pub name: String,
    /// Tile kind placed where this ore wins.
    pub kind: TileKind,
    /// Noise frequency of the ore's mask.
    pub frequency: f64,
    /// Mask threshold. Cells where noise > size hold ore. Higher = rarer.
    pub size: f64,
    /// Ore only spawns where `column_height - y > max_spawn_height`.
    pub max_spawn_height: f64,
}

impl OreSpec {
    /// The noise channel and threshold that build this ore's mask.
    pub fn threshold(&self) -> NoiseThreshold {
        NoiseThreshold {
            frequency: self.frequency,
            threshold: self.size,
        }
    }

    /// Whether a cell at `y` is deep enough below `column_height` for this ore.
    pub fn deep_enough(&self, y: u32, column_height: f64) -> bool {
        column_height - y as f64 > self.max_spawn_height
    }
}
