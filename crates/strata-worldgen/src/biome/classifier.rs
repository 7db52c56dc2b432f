//! Color-to-biome classification.

use serde::{Deserialize, Serialize};

use super::{BiomeId, Rgb};

/// How a gradient color is turned into a biome.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClassifierStrategy {
    /// Closest reference color wins. Never fails. Matches farther away than
    /// `warn_distance` are reported as distant.
    NearestColor {
        /// Distance above which a match is flagged.
        warn_distance: Option<f32>,
    },
    /// The color must equal a reference color exactly. Misses fall back to the
    /// last biome this classifier matched.
    ExactMatch,
}

impl Default for ClassifierStrategy {
    fn default() -> Self {
        Self::NearestColor {
            warn_distance: Some(0.35),
        }
    }
}

/// Outcome of classifying one color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Classification {
    /// A biome matched within tolerance.
    Matched(BiomeId),
    /// Nearest match, but farther away than the warning distance.
    Distant {
        /// The closest biome.
        biome: BiomeId,
        /// Its distance from the queried color.
        distance: f32,
    },
    /// No exact match; the previously matched biome was returned instead.
    Fallback(BiomeId),
}

impl Classification {
    /// The biome the cell is assigned to, whatever the outcome.
    pub fn biome(self) -> BiomeId {
        match self {
            Self::Matched(id) | Self::Fallback(id) | Self::Distant { biome: id, .. } => id,
        }
    }
}

/// Classifies gradient colors against a set of reference colors.
///
/// Holds the last successful match so exact-match misses have something to
/// fall back to; use one classifier per generation run.
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    strategy: ClassifierStrategy,
    references: Vec<(BiomeId, Rgb)>,
    last_match: Option<BiomeId>,
}

impl BiomeClassifier {
    /// Creates a classifier. `references` must not be empty.
    pub fn new(strategy: ClassifierStrategy, references: Vec<(BiomeId, Rgb)>) -> Self {
        debug_assert!(!references.is_empty(), "classifier needs at least one biome");
        Self {
            strategy,
            references,
            last_match: None,
        }
    }

    /// Classifies one color.
    pub fn classify(&mut self, color: Rgb) -> Classification {
        match self.strategy {
            ClassifierStrategy::NearestColor { warn_distance } => {
                let (biome, distance) = self.nearest(color);
                self.last_match = Some(biome);
                match warn_distance {
                    Some(limit) if distance > limit => Classification::Distant { biome, distance },
                    _ => Classification::Matched(biome),
                }
            }
            ClassifierStrategy::ExactMatch => {
                if let Some(&(biome, _)) = self.references.iter().find(|(_, c)| *c == color) {
                    self.last_match = Some(biome);
                    return Classification::Matched(biome);
                }
                let fallback = self
                    .last_match
                    .or_else(|| self.references.first().map(|&(id, _)| id))
                    .unwrap_or(BiomeId(0));
                Classification::Fallback(fallback)
            }
        }
    }

    fn nearest(&self, color: Rgb) -> (BiomeId, f32) {
        let mut best = (BiomeId(0), f32::INFINITY);
        for &(id, reference) in &self.references {
            let distance = color.distance(reference);
            if distance < best.1 {
                best = (id, distance);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references() -> Vec<(BiomeId, Rgb)> {
        vec![
            (BiomeId(0), Rgb::new(1.0, 0.0, 0.0)),
            (BiomeId(1), Rgb::new(0.0, 1.0, 0.0)),
            (BiomeId(2), Rgb::new(0.0, 0.0, 1.0)),
        ]
    }

    #[test]
    fn test_nearest_picks_closest() {
        let mut classifier = BiomeClassifier::new(
            ClassifierStrategy::NearestColor { warn_distance: None },
            references(),
        );
        let result = classifier.classify(Rgb::new(0.1, 0.8, 0.2));
        assert_eq!(result, Classification::Matched(BiomeId(1)));
    }

    #[test]
    fn test_nearest_flags_distant_match() {
        let mut classifier = BiomeClassifier::new(
            ClassifierStrategy::NearestColor {
                warn_distance: Some(0.1),
            },
            references(),
        );
        match classifier.classify(Rgb::new(0.5, 0.5, 0.5)) {
            Classification::Distant { distance, .. } => assert!(distance > 0.1),
            other => panic!("expected a distant match, got {other:?}"),
        }
    }

    #[test]
    fn test_nearest_never_fails_on_far_colors() {
        let mut classifier = BiomeClassifier::new(ClassifierStrategy::default(), references());
        let biome = classifier.classify(Rgb::new(50.0, -3.0, 9.0)).biome();
        assert!(biome.0 < 3);
    }

    #[test]
    fn test_exact_match_hits() {
        let mut classifier = BiomeClassifier::new(ClassifierStrategy::ExactMatch, references());
        assert_eq!(
            classifier.classify(Rgb::new(0.0, 0.0, 1.0)),
            Classification::Matched(BiomeId(2))
        );
    }

    #[test]
    fn test_exact_miss_falls_back_to_previous_match() {
        let mut classifier = BiomeClassifier::new(ClassifierStrategy::ExactMatch, references());
        classifier.classify(Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(
            classifier.classify(Rgb::new(0.0, 0.999, 0.0)),
            Classification::Fallback(BiomeId(1))
        );
    }

    #[test]
    fn test_exact_miss_before_any_match_uses_first_biome() {
        let mut classifier = BiomeClassifier::new(ClassifierStrategy::ExactMatch, references());
        assert_eq!(
            classifier.classify(Rgb::new(0.3, 0.3, 0.3)),
            Classification::Fallback(BiomeId(0))
        );
    }
}
