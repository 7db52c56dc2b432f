//! The per-world biome grid, computed once per generation run.

use super::{BiomeClassifier, BiomeId, Classification, Gradient};
use crate::noise_field::NoiseField;

/// Counters for noteworthy classification outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    /// Exact-match misses that fell back to an earlier biome.
    pub unclassifiable: u32,
    /// Nearest-color matches beyond the warning distance.
    pub distant: u32,
}

/// A `width × height` grid of biome assignments. Read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeGrid {
    width: u32,
    height: u32,
    cells: Vec<BiomeId>,
}

impl BiomeGrid {
    /// Builds the grid by sampling the biome channel at every cell, mapping the
    /// value through `gradient` and classifying the resulting color.
    ///
    /// Cells are visited column by column (x outer, y inner); exact-match
    /// fallbacks depend on that order.
    pub fn build(
        field: &NoiseField,
        frequency: f64,
        gradient: &Gradient,
        classifier: &mut BiomeClassifier,
        width: u32,
        height: u32,
    ) -> (Self, ClassificationStats) {
        let mut cells = vec![BiomeId(0); width as usize * height as usize];
        let mut stats = ClassificationStats::default();

        for x in 0..width {
            for y in 0..height {
                let value = field.sample(x as f64, y as f64, frequency);
                let outcome = classifier.classify(gradient.evaluate(value));
                match outcome {
                    Classification::Matched(_) => {}
                    Classification::Distant { biome, distance } => {
                        stats.distant += 1;
                        tracing::debug!(x, y, ?biome, distance, "distant biome match");
                    }
                    Classification::Fallback(biome) => {
                        stats.unclassifiable += 1;
                        tracing::debug!(x, y, ?biome, "no exact biome match, reusing previous");
                    }
                }
                cells[(y * width + x) as usize] = outcome.biome();
            }
        }

        (
            Self {
                width,
                height,
                cells,
            },
            stats,
        )
    }

    /// A grid with every cell assigned to `biome`.
    pub fn uniform(width: u32, height: u32, biome: BiomeId) -> Self {
        Self {
            width,
            height,
            cells: vec![biome; width as usize * height as usize],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The biome at `(x, y)`, or `None` outside the grid.
    pub fn try_get(&self, x: i32, y: i32) -> Option<BiomeId> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(self.cells[(y as u32 * self.width + x as u32) as usize])
    }

    /// The biome at `(x, y)`, clamping coordinates to the grid.
    pub fn get(&self, x: i32, y: i32) -> BiomeId {
        let cx = x.clamp(0, self.width.saturating_sub(1) as i32) as u32;
        let cy = y.clamp(0, self.height.saturating_sub(1) as i32) as u32;
        self.cells[(cy * self.width + cx) as usize]
    }

    /// Number of cells assigned to `biome`.
    pub fn count(&self, biome: BiomeId) -> usize {
        self.cells.iter().filter(|&&b| b == biome).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{ClassifierStrategy, GradientKey, GradientMode, Rgb};

    fn two_biome_setup() -> (Gradient, BiomeClassifier) {
        let low = Rgb::new(1.0, 0.0, 0.0);
        let high = Rgb::new(0.0, 0.0, 1.0);
        let gradient = Gradient::new(
            GradientMode::Blend,
            vec![
                GradientKey { time: 0.0, color: low },
                GradientKey { time: 1.0, color: high },
            ],
        )
        .unwrap();
        let classifier = BiomeClassifier::new(
            ClassifierStrategy::NearestColor { warn_distance: None },
            vec![(BiomeId(0), low), (BiomeId(1), high)],
        );
        (gradient, classifier)
    }

    #[test]
    fn test_grid_is_deterministic() {
        let field = NoiseField::new(5);
        let (gradient, mut classifier_a) = two_biome_setup();
        let (_, mut classifier_b) = two_biome_setup();
        let (a, _) = BiomeGrid::build(&field, 0.05, &gradient, &mut classifier_a, 40, 30);
        let (b, _) = BiomeGrid::build(&field, 0.05, &gradient, &mut classifier_b, 40, 30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_grid_assigns_by_noise_half() {
        let field = NoiseField::new(11);
        let (gradient, mut classifier) = two_biome_setup();
        let (grid, _) = BiomeGrid::build(&field, 0.05, &gradient, &mut classifier, 30, 30);
        for x in 0..30 {
            for y in 0..30 {
                let value = field.sample(x as f64, y as f64, 0.05);
                let expected = if value < 0.5 { BiomeId(0) } else { BiomeId(1) };
                if (value - 0.5).abs() > 1e-3 {
                    assert_eq!(grid.get(x, y), expected, "wrong biome at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_lookups() {
        let grid = BiomeGrid::uniform(4, 4, BiomeId(3));
        assert_eq!(grid.try_get(-1, 0), None);
        assert_eq!(grid.try_get(0, 4), None);
        assert_eq!(grid.get(-5, 100), BiomeId(3));
        assert_eq!(grid.count(BiomeId(3)), 16);
    }
}
