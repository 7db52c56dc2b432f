//! Chunk partitioning of world x coordinates.
//!
//! Chunk `i` owns columns `[i * chunk_size, (i + 1) * chunk_size)`. The world
//! holds `floor(width / chunk_size)` chunks; columns past the last full chunk
//! (and negative columns) belong to no chunk and their placements are rejected.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PlacementError};
use crate::tile::TileKind;

/// Index of a chunk, in `[0, num_chunks)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkId(pub u32);

/// One placed tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePlacement {
    /// Column.
    pub x: i32,
    /// Row, growing upward from the world floor.
    pub y: i32,
    /// Tile kind.
    pub kind: TileKind,
    /// Visual variant, in `[0, variant_count(kind))`.
    pub variant: u16,
}

/// Maps x coordinates to chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkIndex {
    chunk_size: u32,
    num_chunks: u32,
}

impl ChunkIndex {
    /// Partitions a world `world_width` cells wide.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidChunkSize`] if `chunk_size` is zero or
    /// larger than the world, which would leave no chunk at all.
    pub fn new(world_width: u32, chunk_size: u32) -> Result<Self, ConfigError> {
        if chunk_size == 0 || chunk_size > world_width {
            return Err(ConfigError::InvalidChunkSize {
                chunk_size,
                width: world_width,
            });
        }
        Ok(Self {
            chunk_size,
            num_chunks: world_width / chunk_size,
        })
    }

    /// Cells per chunk.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Number of chunks.
    pub fn num_chunks(&self) -> u32 {
        self.num_chunks
    }

    /// The chunk owning column `x` (floor division).
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::OutOfBounds`] when the index falls outside
    /// `[0, num_chunks)`.
    pub fn chunk_of(&self, x: i32) -> Result<ChunkId, PlacementError> {
        let index = i64::from(x).div_euclid(i64::from(self.chunk_size));
        if index < 0 || index >= i64::from(self.num_chunks) {
            return Err(PlacementError::OutOfBounds {
                x,
                chunk: index,
                num_chunks: self.num_chunks,
            });
        }
        Ok(ChunkId(index as u32))
    }

    /// Columns owned by `chunk`.
    pub fn columns(&self, chunk: ChunkId) -> Range<i32> {
        let start = (chunk.0 * self.chunk_size) as i32;
        start..start + self.chunk_size as i32
    }
}

/// Ownership container for the placements of one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    id: ChunkId,
    columns: Range<i32>,
    placements: Vec<TilePlacement>,
}

impl Chunk {
    /// An empty chunk.
    pub fn new(id: ChunkId, columns: Range<i32>) -> Self {
        Self {
            id,
            columns,
            placements: Vec::new(),
        }
    }

    /// The chunk's index.
    pub fn id(&self) -> ChunkId {
        self.id
    }

    /// Columns this chunk owns.
    pub fn columns(&self) -> Range<i32> {
        self.columns.clone()
    }

    /// Placements in emission order.
    pub fn placements(&self) -> &[TilePlacement] {
        &self.placements
    }

    pub(crate) fn push(&mut self, placement: TilePlacement) {
        debug_assert!(self.columns.contains(&placement.x));
        self.placements.push(placement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_100_chunk_16() {
        let index = ChunkIndex::new(100, 16).unwrap();
        assert_eq!(index.num_chunks(), 6);
        assert_eq!(index.chunk_of(95).unwrap(), ChunkId(5));
        assert_eq!(index.columns(ChunkId(5)), 80..96);
        assert!(matches!(
            index.chunk_of(100),
            Err(PlacementError::OutOfBounds { chunk: 6, .. })
        ));
    }

    #[test]
    fn test_trailing_partial_chunk_rejected() {
        let index = ChunkIndex::new(100, 16).unwrap();
        assert!(index.chunk_of(96).is_err());
        assert!(index.chunk_of(99).is_err());
    }

    #[test]
    fn test_negative_x_rejected() {
        let index = ChunkIndex::new(64, 16).unwrap();
        assert!(matches!(
            index.chunk_of(-1),
            Err(PlacementError::OutOfBounds { chunk: -1, .. })
        ));
    }

    #[test]
    fn test_chunk_boundaries_use_floor() {
        let index = ChunkIndex::new(64, 16).unwrap();
        assert_eq!(index.chunk_of(15).unwrap(), ChunkId(0));
        assert_eq!(index.chunk_of(16).unwrap(), ChunkId(1));
        assert_eq!(index.chunk_of(63).unwrap(), ChunkId(3));
    }

    #[test]
    fn test_invalid_chunk_sizes() {
        assert!(ChunkIndex::new(100, 0).is_err());
        assert!(ChunkIndex::new(10, 16).is_err());
    }
}
