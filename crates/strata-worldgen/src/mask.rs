//! Boolean masks thresholded from the noise field.
//!
//! A mask cell is `true` where the noise sample exceeds the threshold. The
//! frequency/threshold pair for each cell comes from a [`ThresholdSource`]:
//! either one pair for the whole grid ([`NoiseThreshold`]) or the pair of the
//! cell's biome ([`BiomeCaveThresholds`], [`BiomeOreThresholds`]).

use serde::{Deserialize, Serialize};

use crate::biome::{BiomeGrid, BiomeRegistry};
use crate::noise_field::NoiseField;
use crate::ore::OreSpec;

/// Whether masks are built from global or per-biome parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaskScope {
    /// One frequency/threshold pair for every cell.
    Global,
    /// Each cell uses the parameters of its biome.
    #[default]
    PerBiome,
}

/// A noise channel and the value it must exceed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseThreshold {
    /// Noise frequency.
    pub frequency: f64,
    /// Cells with noise strictly above this are set.
    pub threshold: f64,
}

/// Supplies the noise channel and threshold for each cell of a mask.
pub trait ThresholdSource {
    /// Parameters for `(x, y)`, or `None` to leave the cell unset.
    fn threshold_at(&self, x: u32, y: u32) -> Option<NoiseThreshold>;
}

impl ThresholdSource for NoiseThreshold {
    fn threshold_at(&self, _x: u32, _y: u32) -> Option<NoiseThreshold> {
        Some(*self)
    }
}

/// Cave thresholds taken from each cell's biome.
pub struct BiomeCaveThresholds<'a> {
    /// Biome assignment per cell.
    pub grid: &'a BiomeGrid,
    /// Biome definitions.
    pub biomes: &'a BiomeRegistry,
}

impl ThresholdSource for BiomeCaveThresholds<'_> {
    fn threshold_at(&self, x: u32, y: u32) -> Option<NoiseThreshold> {
        let biome = self.biomes.get(self.grid.get(x as i32, y as i32));
        Some(NoiseThreshold {
            frequency: biome.cave_frequency,
            threshold: biome.surface_value,
        })
    }
}

/// Thresholds of ore `index` taken from each cell's biome ore list.
pub struct BiomeOreThresholds<'a> {
    /// Biome assignment per cell.
    pub grid: &'a BiomeGrid,
    /// Biome definitions.
    pub biomes: &'a BiomeRegistry,
    /// Ore list for biomes without their own.
    pub global: &'a [OreSpec],
    /// Position in the ore list.
    pub index: usize,
}

impl ThresholdSource for BiomeOreThresholds<'_> {
    fn threshold_at(&self, x: u32, y: u32) -> Option<NoiseThreshold> {
        let biome = self.biomes.get(self.grid.get(x as i32, y as i32));
        biome
            .ores_or(self.global)
            .get(self.index)
            .map(OreSpec::threshold)
    }
}

/// A `width × height` boolean grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// A mask with every cell unset.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Mask width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The cell at `(x, y)`; `false` outside the mask.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        self.cells[(y as u32 * self.width + x as u32) as usize]
    }

    /// Sets the cell at `(x, y)`. Ignored outside the mask.
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            self.cells[(y * self.width + x) as usize] = value;
        }
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Builds masks over a fixed grid from one noise field.
pub struct MaskGenerator<'a> {
    field: &'a NoiseField,
    width: u32,
    height: u32,
}

impl<'a> MaskGenerator<'a> {
    /// A generator for `width × height` masks.
    pub fn new(field: &'a NoiseField, width: u32, height: u32) -> Self {
        Self {
            field,
            width,
            height,
        }
    }

    /// Builds one mask: `mask[x][y] = sample(x, y, frequency) > threshold`,
    /// with the pair supplied per cell by `source`.
    pub fn build(&self, source: &impl ThresholdSource) -> Mask {
        let mut mask = Mask::new(self.width, self.height);
        for x in 0..self.width {
            for y in 0..self.height {
                let Some(params) = source.threshold_at(x, y) else {
                    continue;
                };
                let value = self.field.sample(x as f64, y as f64, params.frequency);
                mask.set(x, y, value > params.threshold);
            }
        }
        mask
    }
}

/// Builds a mask with one frequency/threshold pair for the whole grid.
pub fn build_mask(
    field: &NoiseField,
    width: u32,
    height: u32,
    frequency: f64,
    threshold: f64,
) -> Mask {
    MaskGenerator::new(field, width, height).build(&NoiseThreshold {
        frequency,
        threshold,
    })
}

/// The cave mask and one mask per ore slot of a world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldMasks {
    /// `true` where rock survives cave carving.
    pub cave: Mask,
    /// One mask per ore slot, in ore-list order.
    pub ores: Vec<Mask>,
}

impl WorldMasks {
    /// Builds every mask of a world.
    ///
    /// Under [`MaskScope::Global`] the cave mask uses `global_cave` and ore
    /// slot `N` uses `global_ores[N]`. Under [`MaskScope::PerBiome`] each cell
    /// uses its biome's cave parameters and its biome's ore `N`; the number of
    /// ore slots is the longest ore list in use.
    pub fn build(
        generator: &MaskGenerator<'_>,
        scope: MaskScope,
        global_cave: NoiseThreshold,
        global_ores: &[OreSpec],
        grid: &BiomeGrid,
        biomes: &BiomeRegistry,
    ) -> Self {
        match scope {
            MaskScope::Global => Self {
                cave: generator.build(&global_cave),
                ores: global_ores
                    .iter()
                    .map(|ore| generator.build(&ore.threshold()))
                    .collect(),
            },
            MaskScope::PerBiome => {
                let slots = biomes
                    .iter()
                    .map(|(_, biome)| biome.ores_or(global_ores).len())
                    .max()
                    .unwrap_or(0);
                Self {
                    cave: generator.build(&BiomeCaveThresholds { grid, biomes }),
                    ores: (0..slots)
                        .map(|index| {
                            generator.build(&BiomeOreThresholds {
                                grid,
                                biomes,
                                global: global_ores,
                                index,
                            })
                        })
                        .collect(),
                }
            }
        }
    }

    /// Whether ore slot `index` is set at `(x, y)`.
    pub fn ore(&self, index: usize, x: i32, y: i32) -> bool {
        self.ores.get(index).is_some_and(|mask| mask.get(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_matches_threshold_rule() {
        let field = NoiseField::new(3);
        let mask = build_mask(&field, 32, 32, 0.08, 0.5);
        for x in 0..32 {
            for y in 0..32 {
                let expected = field.sample(x as f64, y as f64, 0.08) > 0.5;
                assert_eq!(mask.get(x, y), expected, "mask mismatch at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_threshold_controls_density() {
        let field = NoiseField::new(3);
        let sparse = build_mask(&field, 64, 64, 0.1, 0.7);
        let dense = build_mask(&field, 64, 64, 0.1, 0.3);
        assert!(
            dense.count() > sparse.count(),
            "Lower threshold should set more cells: dense={}, sparse={}",
            dense.count(),
            sparse.count()
        );
    }

    #[test]
    fn test_extreme_thresholds() {
        let field = NoiseField::new(8);
        assert_eq!(build_mask(&field, 16, 16, 0.1, 1.0).count(), 0);
        assert_eq!(build_mask(&field, 16, 16, 0.1, -0.01).count(), 256);
    }

    #[test]
    fn test_out_of_range_reads_unset() {
        let mut mask = Mask::new(4, 4);
        mask.set(3, 3, true);
        mask.set(9, 9, true);
        assert!(mask.get(3, 3));
        assert!(!mask.get(-1, 0));
        assert!(!mask.get(4, 0));
        assert_eq!(mask.count(), 1);
    }

    struct LeftHalfOnly;

    impl ThresholdSource for LeftHalfOnly {
        fn threshold_at(&self, x: u32, _y: u32) -> Option<NoiseThreshold> {
            (x < 8).then_some(NoiseThreshold {
                frequency: 0.1,
                threshold: -1.0,
            })
        }
    }

    #[test]
    fn test_source_can_skip_cells() {
        let field = NoiseField::new(1);
        let mask = MaskGenerator::new(&field, 16, 4).build(&LeftHalfOnly);
        assert_eq!(mask.count(), 8 * 4);
        assert!(mask.get(7, 0));
        assert!(!mask.get(8, 0));
    }
}
