//! Surface decoration: trees, cacti and tall grass.
//!
//! Each column gets one decoration attempt on its top row. A tree is tried
//! first; tall grass only when no tree was rolled. Nothing is placed unless the
//! surface tile under it was actually placed, so decorations never float over
//! a carved cave mouth.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::placement::WorldTiles;
use crate::tile::TileAtlas;

/// What a biome grows when a tree spawns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeShape {
    /// Log trunk topped by the fixed seven-leaf canopy.
    #[default]
    Canopy,
    /// Trunk only.
    Cactus,
}

/// Leaf cells relative to the cell directly above the trunk: a three-high
/// center column plus one cell left and right on the two lower rows.
pub const CANOPY_OFFSETS: [(i32, i32); 7] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (-1, 0),
    (-1, 1),
    (1, 0),
    (1, 1),
];

/// Outcome of the decoration draw for one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationRoll {
    /// Grow a tree.
    Tree,
    /// Place one tall grass tile.
    TallGrass,
    /// Leave the surface bare.
    Nothing,
}

/// Draws the decoration for one column: a `1` from `[0, tree_chance)` grows a
/// tree, otherwise a `1` from `[0, tall_grass_chance)` places tall grass.
pub fn roll(rng: &mut impl Rng, biome: &Biome) -> DecorationRoll {
    if rng.random_range(0..biome.tree_chance.max(1)) == 1 {
        return DecorationRoll::Tree;
    }
    if rng.random_range(0..biome.tall_grass_chance.max(1)) == 1 {
        return DecorationRoll::TallGrass;
    }
    DecorationRoll::Nothing
}

/// Decorates the column at `x` whose top row is `top`.
pub fn decorate_column(tiles: &mut WorldTiles, atlas: &TileAtlas, biome: &Biome, x: i32, top: i32) {
    let decoration = roll(tiles.rng(), biome);
    if decoration == DecorationRoll::Nothing || !tiles.is_occupied(x, top) {
        return;
    }

    match decoration {
        DecorationRoll::Tree => {
            let trunk = tiles
                .rng()
                .random_range(biome.min_tree_height..=biome.max_tree_height);
            grow_tree(tiles, atlas, biome, x, top + 1, trunk as i32);
        }
        DecorationRoll::TallGrass => match biome.tiles.tall_grass {
            Some(kind) => {
                if tiles.place_or_skip(atlas, kind, x, top + 1) {
                    tiles.stats_mut().tall_grass += 1;
                }
            }
            None => tracing::trace!(x, biome = %biome.name, "biome has no tall grass"),
        },
        DecorationRoll::Nothing => {}
    }
}

/// Places a tree of `trunk` logs whose base is at `(x, base)`.
pub fn grow_tree(
    tiles: &mut WorldTiles,
    atlas: &TileAtlas,
    biome: &Biome,
    x: i32,
    base: i32,
    trunk: i32,
) {
    for i in 0..trunk {
        tiles.place_or_skip(atlas, biome.tiles.log, x, base + i);
    }

    match biome.tree_shape {
        TreeShape::Canopy => {
            let crown = base + trunk;
            for (dx, dy) in CANOPY_OFFSETS {
                tiles.place_or_skip(atlas, biome.tiles.leaf, x + dx, crown + dy);
            }
            tiles.stats_mut().trees += 1;
        }
        TreeShape::Cactus => tiles.stats_mut().cacti += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkIndex;
    use crate::test_support::{plain_biome, test_atlas};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn kinds_at(tiles: &WorldTiles) -> hashbrown::HashMap<(i32, i32), crate::TileKind> {
        tiles
            .chunks()
            .iter()
            .flat_map(|c| c.placements())
            .map(|p| ((p.x, p.y), p.kind))
            .collect()
    }

    #[test]
    fn test_canopy_shape() {
        let atlas = test_atlas();
        let biome = plain_biome();
        let mut tiles = WorldTiles::new(ChunkIndex::new(32, 32).unwrap(), 3);
        grow_tree(&mut tiles, &atlas, &biome, 10, 20, 4);

        let placed = kinds_at(&tiles);
        assert_eq!(placed.len(), 4 + 7);
        for y in 20..24 {
            assert_eq!(placed[&(10, y)], biome.tiles.log);
        }
        for (dx, dy) in [(0, 24), (0, 25), (0, 26), (-1, 24), (-1, 25), (1, 24), (1, 25)] {
            assert_eq!(placed[&(10 + dx, dy)], biome.tiles.leaf, "missing leaf at dx={dx}, y={dy}");
        }
        assert!(!placed.contains_key(&(9, 26)));
        assert!(!placed.contains_key(&(11, 26)));
        assert_eq!(tiles.stats().trees, 1);
    }

    #[test]
    fn test_cactus_has_no_leaves() {
        let atlas = test_atlas();
        let biome = Biome {
            tree_shape: TreeShape::Cactus,
            ..plain_biome()
        };
        let mut tiles = WorldTiles::new(ChunkIndex::new(32, 32).unwrap(), 3);
        grow_tree(&mut tiles, &atlas, &biome, 5, 10, 3);
        let placed = kinds_at(&tiles);
        assert_eq!(placed.len(), 3);
        assert!(placed.values().all(|&k| k == biome.tiles.log));
        assert_eq!(tiles.stats().cacti, 1);
    }

    #[test]
    fn test_leaves_left_of_world_are_rejected() {
        let atlas = test_atlas();
        let biome = plain_biome();
        let mut tiles = WorldTiles::new(ChunkIndex::new(32, 32).unwrap(), 3);
        grow_tree(&mut tiles, &atlas, &biome, 0, 10, 3);
        assert_eq!(tiles.stats().out_of_bounds, 2);
        assert_eq!(kinds_at(&tiles).len(), 3 + 5);
    }

    #[test]
    fn test_no_decoration_without_base_tile() {
        let atlas = test_atlas();
        let biome = Biome {
            tree_chance: 2,
            tall_grass_chance: 2,
            ..plain_biome()
        };
        let mut tiles = WorldTiles::new(ChunkIndex::new(32, 32).unwrap(), 3);
        for x in 0..32 {
            decorate_column(&mut tiles, &atlas, &biome, x, 10);
        }
        assert_eq!(tiles.stats().placed, 0);
    }

    #[test]
    fn test_roll_never_fires_with_chance_one() {
        let biome = Biome {
            tree_chance: 1,
            tall_grass_chance: 1,
            ..plain_biome()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..1000 {
            assert_eq!(roll(&mut rng, &biome), DecorationRoll::Nothing);
        }
    }

    #[test]
    fn test_roll_fires_sometimes() {
        let biome = Biome {
            tree_chance: 4,
            tall_grass_chance: 2,
            ..plain_biome()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let rolls: Vec<_> = (0..1000).map(|_| roll(&mut rng, &biome)).collect();
        assert!(rolls.contains(&DecorationRoll::Tree));
        assert!(rolls.contains(&DecorationRoll::TallGrass));
        assert!(rolls.contains(&DecorationRoll::Nothing));
    }
}
