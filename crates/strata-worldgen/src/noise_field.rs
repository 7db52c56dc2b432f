//! Coherent 2D noise sampled in `[0, 1]`.
//!
//! One [`NoiseField`] serves every noise channel of a world (biomes, caves,
//! ores, terrain height); channels differ only by frequency. The world seed is
//! folded in as an offset added to both axes before frequency scaling.

use noise::{NoiseFn, Perlin};
use rand::Rng;

use crate::seed::{NOISE_OFFSET_STREAM, NOISE_PERMUTATION_STREAM, derive_stream_seed, stream_rng};

/// Half-width of the range the per-world axis offset is drawn from.
pub const OFFSET_RANGE: f64 = 10_000.0;

/// Deterministic Perlin noise with a per-world axis offset.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    offset: f64,
}

impl NoiseField {
    /// Create the noise field for a world seed.
    pub fn new(world_seed: u64) -> Self {
        let mut rng = stream_rng(world_seed, NOISE_OFFSET_STREAM);
        let offset = rng.random_range(-OFFSET_RANGE..OFFSET_RANGE);
        let permutation = derive_stream_seed(world_seed, NOISE_PERMUTATION_STREAM) as u32;
        Self::with_offset(permutation, offset)
    }

    /// Create a field with an explicit permutation seed and axis offset.
    pub fn with_offset(permutation_seed: u32, offset: f64) -> Self {
        Self {
            perlin: Perlin::new(permutation_seed),
            offset,
        }
    }

    /// The axis offset folded into every sample.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Sample the field at `(x, y)` scaled by `frequency`. Always in `[0, 1]`.
    pub fn sample(&self, x: f64, y: f64, frequency: f64) -> f64 {
        let raw = self.perlin.get([
            (x + self.offset) * frequency,
            (y + self.offset) * frequency,
        ]);
        // Normalize from [-1, 1] to [0, 1].
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Sample along x with the y argument pinned to the world offset.
    pub fn sample_1d(&self, x: f64, frequency: f64) -> f64 {
        self.sample(x, 0.0, frequency)
    }
}
