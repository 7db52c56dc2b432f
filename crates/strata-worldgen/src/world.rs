//! The finished output of a generation run.

use std::hash::{DefaultHasher, Hash, Hasher};

use hashbrown::HashMap;

use crate::biome::{BiomeGrid, BiomeId};
use crate::chunk::{Chunk, ChunkId, TilePlacement};
use crate::tile::TileKind;

/// Counters collected during one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Tiles placed.
    pub placed: u64,
    /// Requests for an already-occupied coordinate.
    pub duplicates_skipped: u64,
    /// Requests for a column outside every chunk.
    pub out_of_bounds: u64,
    /// Requests for a kind the atlas has no variants for.
    pub missing_kind: u64,
    /// Cells left empty by the cave mask.
    pub cave_suppressed: u64,
    /// Canopy trees grown.
    pub trees: u32,
    /// Cacti grown.
    pub cacti: u32,
    /// Tall grass tiles placed.
    pub tall_grass: u32,
    /// Biome cells assigned by exact-match fallback.
    pub unclassifiable: u32,
    /// Biome cells matched beyond the warning distance.
    pub distant_matches: u32,
}

/// A generated world: chunks of placements plus the data they were derived
/// from.
#[derive(Clone, Debug)]
pub struct GeneratedWorld {
    seed: u64,
    width: u32,
    height: u32,
    chunk_size: u32,
    chunks: Vec<Chunk>,
    biome_grid: BiomeGrid,
    heights: Vec<f64>,
    stats: GenerationStats,
    tiles: HashMap<(i32, i32), TileKind>,
}

impl GeneratedWorld {
    pub(crate) fn new(
        seed: u64,
        (width, height, chunk_size): (u32, u32, u32),
        chunks: Vec<Chunk>,
        biome_grid: BiomeGrid,
        heights: Vec<f64>,
        stats: GenerationStats,
    ) -> Self {
        let tiles = chunks
            .iter()
            .flat_map(Chunk::placements)
            .map(|p| ((p.x, p.y), p.kind))
            .collect();
        Self {
            seed,
            width,
            height,
            chunk_size,
            chunks,
            biome_grid,
            heights,
            stats,
            tiles,
        }
    }

    /// Seed the world was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// World width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cells per chunk.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// All chunks, in index order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// One chunk, or `None` past the last one.
    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id.0 as usize)
    }

    /// Every placement, chunk by chunk in emission order.
    pub fn placements(&self) -> impl Iterator<Item = &TilePlacement> {
        self.chunks.iter().flat_map(Chunk::placements)
    }

    /// Total number of placed tiles.
    pub fn placement_count(&self) -> usize {
        self.tiles.len()
    }

    /// The tile kind at `(x, y)`, if any.
    pub fn tile_at(&self, x: i32, y: i32) -> Option<TileKind> {
        self.tiles.get(&(x, y)).copied()
    }

    /// Continuous surface height of column `x`, for columns that were
    /// generated.
    pub fn column_height(&self, x: u32) -> Option<f64> {
        self.heights.get(x as usize).copied()
    }

    /// The biome assignment grid.
    pub fn biome_grid(&self) -> &BiomeGrid {
        &self.biome_grid
    }

    /// The biome at `(x, y)`, or `None` outside the grid.
    pub fn biome_at(&self, x: i32, y: i32) -> Option<BiomeId> {
        self.biome_grid.try_get(x, y)
    }

    /// Counters collected during the run.
    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Order-sensitive hash of every placement. Two runs with the same seed
    /// and configuration produce the same hash.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for chunk in &self.chunks {
            chunk.id().hash(&mut hasher);
            chunk.placements().hash(&mut hasher);
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkIndex;

    fn sample_world(kind: TileKind) -> GeneratedWorld {
        let index = ChunkIndex::new(8, 4).unwrap();
        let mut chunks = vec![
            Chunk::new(ChunkId(0), index.columns(ChunkId(0))),
            Chunk::new(ChunkId(1), index.columns(ChunkId(1))),
        ];
        chunks[1].push(TilePlacement {
            x: 5,
            y: 2,
            kind,
            variant: 0,
        });
        GeneratedWorld::new(
            1,
            (8, 8, 4),
            chunks,
            BiomeGrid::uniform(8, 8, BiomeId(0)),
            vec![2.5; 8],
            GenerationStats::default(),
        )
    }

    #[test]
    fn test_queries() {
        let world = sample_world(TileKind(3));
        assert_eq!(world.tile_at(5, 2), Some(TileKind(3)));
        assert_eq!(world.tile_at(5, 3), None);
        assert_eq!(world.placement_count(), 1);
        assert_eq!(world.chunk(ChunkId(1)).unwrap().placements().len(), 1);
        assert!(world.chunk(ChunkId(2)).is_none());
        assert_eq!(world.column_height(7), Some(2.5));
        assert_eq!(world.column_height(8), None);
        assert_eq!(world.biome_at(0, 0), Some(BiomeId(0)));
        assert_eq!(world.biome_at(8, 0), None);
    }

    #[test]
    fn test_content_hash_tracks_placements() {
        assert_eq!(
            sample_world(TileKind(3)).content_hash(),
            sample_world(TileKind(3)).content_hash()
        );
        assert_ne!(
            sample_world(TileKind(3)).content_hash(),
            sample_world(TileKind(4)).content_hash()
        );
    }
}
