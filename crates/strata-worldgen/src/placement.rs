//! Idempotent tile placement into chunks.
//!
//! [`WorldTiles`] owns everything placement mutates during a run: the set of
//! occupied coordinates, the chunks, the placement RNG and the run counters.
//! A coordinate is only registered once its placement succeeds, so a rejected
//! request leaves no trace besides its counter.

use hashbrown::HashSet;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::chunk::{Chunk, ChunkId, ChunkIndex, TilePlacement};
use crate::error::PlacementError;
use crate::seed::{PLACEMENT_STREAM, stream_rng};
use crate::tile::{TileAtlas, TileKind};
use crate::world::GenerationStats;

/// Placement state of one generation run.
#[derive(Clone, Debug)]
pub struct WorldTiles {
    index: ChunkIndex,
    chunks: Vec<Chunk>,
    occupied: HashSet<(i32, i32)>,
    rng: ChaCha8Rng,
    stats: GenerationStats,
}

impl WorldTiles {
    /// Empty chunks for `index`, with the placement stream of `world_seed`.
    pub fn new(index: ChunkIndex, world_seed: u64) -> Self {
        let chunks = (0..index.num_chunks())
            .map(|i| Chunk::new(ChunkId(i), index.columns(ChunkId(i))))
            .collect();
        Self {
            index,
            chunks,
            occupied: HashSet::new(),
            rng: stream_rng(world_seed, PLACEMENT_STREAM),
            stats: GenerationStats::default(),
        }
    }

    /// Places `kind` at `(x, y)` with a random visual variant.
    ///
    /// # Errors
    ///
    /// - [`PlacementError::Occupied`] if the coordinate already holds a tile
    /// - [`PlacementError::OutOfBounds`] if the column has no chunk
    /// - [`PlacementError::MissingTileKind`] if the atlas has no variants for `kind`
    pub fn place(
        &mut self,
        atlas: &TileAtlas,
        kind: TileKind,
        x: i32,
        y: i32,
    ) -> Result<TilePlacement, PlacementError> {
        if self.occupied.contains(&(x, y)) {
            return Err(PlacementError::Occupied { x, y });
        }
        let chunk = self.index.chunk_of(x)?;
        let variants = atlas.variant_count(kind);
        if variants == 0 {
            return Err(PlacementError::MissingTileKind { kind });
        }

        let placement = TilePlacement {
            x,
            y,
            kind,
            variant: self.rng.random_range(0..variants),
        };
        self.occupied.insert((x, y));
        self.chunks[chunk.0 as usize].push(placement);
        self.stats.placed += 1;
        Ok(placement)
    }

    /// Like [`place`](Self::place), but logs and counts a rejection instead of
    /// returning it. Returns whether a tile was placed.
    ///
    /// Rejections are logged at debug level; the builder reports their totals
    /// once per run.
    pub fn place_or_skip(&mut self, atlas: &TileAtlas, kind: TileKind, x: i32, y: i32) -> bool {
        match self.place(atlas, kind, x, y) {
            Ok(_) => true,
            Err(err) => {
                self.record_rejection(err);
                false
            }
        }
    }

    fn record_rejection(&mut self, err: PlacementError) {
        match err {
            PlacementError::Occupied { .. } => self.stats.duplicates_skipped += 1,
            PlacementError::OutOfBounds { .. } => {
                self.stats.out_of_bounds += 1;
                tracing::debug!("placement skipped: {err}");
            }
            PlacementError::MissingTileKind { .. } => {
                self.stats.missing_kind += 1;
                tracing::debug!("placement skipped: {err}");
            }
        }
    }

    /// Whether `(x, y)` holds a tile.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.occupied.contains(&(x, y))
    }

    /// The placement RNG, for decoration draws.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Run counters.
    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Mutable run counters.
    pub fn stats_mut(&mut self) -> &mut GenerationStats {
        &mut self.stats
    }

    /// The chunks, in index order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The chunk partitioning.
    pub fn index(&self) -> ChunkIndex {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileKindDef;

    fn atlas() -> (TileAtlas, TileKind, TileKind) {
        let mut atlas = TileAtlas::new();
        let stone = atlas
            .register(TileKindDef::new("stone", 4, [0, 0, 0], '#'))
            .unwrap();
        let ghost = atlas
            .register(TileKindDef::new("ghost", 0, [0, 0, 0], '?'))
            .unwrap();
        (atlas, stone, ghost)
    }

    #[test]
    fn test_second_placement_is_noop() {
        let (atlas, stone, _) = atlas();
        let mut tiles = WorldTiles::new(ChunkIndex::new(32, 16).unwrap(), 1);
        assert!(tiles.place(&atlas, stone, 3, 4).is_ok());
        assert_eq!(
            tiles.place(&atlas, stone, 3, 4),
            Err(PlacementError::Occupied { x: 3, y: 4 })
        );
        assert_eq!(tiles.chunks()[0].placements().len(), 1);
        assert_eq!(tiles.stats().placed, 1);
    }

    #[test]
    fn test_placement_lands_in_owning_chunk() {
        let (atlas, stone, _) = atlas();
        let mut tiles = WorldTiles::new(ChunkIndex::new(32, 16).unwrap(), 1);
        tiles.place(&atlas, stone, 20, 0).unwrap();
        assert!(tiles.chunks()[0].placements().is_empty());
        assert_eq!(tiles.chunks()[1].placements()[0].x, 20);
    }

    #[test]
    fn test_rejected_coordinate_is_not_registered() {
        let (atlas, stone, ghost) = atlas();
        let mut tiles = WorldTiles::new(ChunkIndex::new(32, 16).unwrap(), 1);
        assert!(!tiles.place_or_skip(&atlas, ghost, 5, 5));
        assert!(!tiles.is_occupied(5, 5));
        assert!(tiles.place_or_skip(&atlas, stone, 5, 5));
        assert!(!tiles.place_or_skip(&atlas, stone, 40, 0));
        assert!(!tiles.is_occupied(40, 0));

        let stats = tiles.stats();
        assert_eq!(stats.missing_kind, 1);
        assert_eq!(stats.out_of_bounds, 1);
        assert_eq!(stats.placed, 1);
    }

    #[test]
    fn test_variant_within_range() {
        let (atlas, stone, _) = atlas();
        let mut tiles = WorldTiles::new(ChunkIndex::new(16, 16).unwrap(), 77);
        for y in 0..200 {
            let placement = tiles.place(&atlas, stone, 0, y).unwrap();
            assert!(placement.variant < 4);
        }
    }
}
