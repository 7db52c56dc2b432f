//! Renderers for biome grids, masks and generated worlds.

use super::image::DebugImage;
use crate::biome::{BiomeGrid, BiomeRegistry};
use crate::mask::Mask;
use crate::tile::TileAtlas;
use crate::world::GeneratedWorld;

/// Background of [`render_world`].
pub const SKY: [u8; 3] = [135, 190, 235];
/// Set cells of [`render_mask`].
pub const MASK_SET: [u8; 3] = [230, 230, 230];
/// Clear cells of [`render_mask`].
pub const MASK_CLEAR: [u8; 3] = [20, 20, 30];

/// Image row for world row `y` in an image `height` rows tall.
fn flip(y: u32, height: u32) -> u32 {
    height - 1 - y
}

/// Paints every grid cell with its biome's reference color.
pub fn render_biome_grid(grid: &BiomeGrid, biomes: &BiomeRegistry) -> DebugImage {
    let (width, height) = (grid.width(), grid.height());
    let mut image = DebugImage::new(width, height);
    for x in 0..width {
        for y in 0..height {
            let color = biomes.get(grid.get(x as i32, y as i32)).color.to_u8();
            image.put(x, flip(y, height), color);
        }
    }
    image
}

/// Light where the mask is set, dark elsewhere.
pub fn render_mask(mask: &Mask) -> DebugImage {
    let (width, height) = (mask.width(), mask.height());
    let mut image = DebugImage::new(width, height);
    for x in 0..width {
        for y in 0..height {
            let color = if mask.get(x as i32, y as i32) {
                MASK_SET
            } else {
                MASK_CLEAR
            };
            image.put(x, flip(y, height), color);
        }
    }
    image
}

/// Paints every placed tile with its kind's preview color over [`SKY`].
///
/// Tiles outside `width × height` (decorations above the grid) are clipped.
pub fn render_world(world: &GeneratedWorld, atlas: &TileAtlas) -> DebugImage {
    let (width, height) = (world.width(), world.height());
    let mut image = DebugImage::filled(width, height, SKY);
    for placement in world.placements() {
        let (Ok(x), Ok(y)) = (u32::try_from(placement.x), u32::try_from(placement.y)) else {
            continue;
        };
        if x >= width || y >= height {
            continue;
        }
        let color = atlas
            .get(placement.kind)
            .map_or([255, 0, 255], |def| def.preview_color);
        image.put(x, flip(y, height), color);
    }
    image
}

/// One line per row, top row first, using each kind's glyph and `.` for air.
/// Rows above the highest placed tile are omitted.
pub fn render_ascii(world: &GeneratedWorld, atlas: &TileAtlas) -> String {
    let top = world.placements().map(|p| p.y).max().unwrap_or(-1);
    let mut out = String::new();
    for y in (0..=top).rev() {
        for x in 0..world.width() as i32 {
            let glyph = world
                .tile_at(x, y)
                .and_then(|kind| atlas.get(kind))
                .map_or('.', |def| def.glyph);
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeId;
    use crate::builder::WorldBuilder;
    use crate::test_support::{small_config, test_atlas};

    #[test]
    fn test_mask_render_flips_rows() {
        let mut mask = Mask::new(4, 3);
        mask.set(1, 0, true);
        let image = render_mask(&mask);
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.get_pixel(1, 2), [230, 230, 230, 255]);
        assert_eq!(image.get_pixel(1, 0), [20, 20, 30, 255]);
    }

    #[test]
    fn test_biome_grid_uses_reference_colors() {
        let mut builder = WorldBuilder::new(&small_config(), test_atlas()).unwrap();
        builder.build_masks();
        let grid = BiomeGrid::uniform(5, 5, BiomeId(0));
        let image = render_biome_grid(&grid, builder.biomes());
        let expected = builder.biomes().get(BiomeId(0)).color.to_u8();
        let [r, g, b, _] = image.get_pixel(2, 2);
        assert_eq!([r, g, b], expected);
        assert_eq!(image.unique_color_count(), 1);
    }

    #[test]
    fn test_world_render_shows_ground_and_sky() {
        let atlas = test_atlas();
        let mut builder = WorldBuilder::new(&small_config(), atlas.clone()).unwrap();
        let world = builder.generate();
        let image = render_world(&world, &atlas);
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(image.get_pixel(0, 0), [SKY[0], SKY[1], SKY[2], 255]);
        assert!(image.unique_color_count() > 2);
    }

    #[test]
    fn test_ascii_rows_match_width() {
        let atlas = test_atlas();
        let mut builder = WorldBuilder::new(&small_config(), atlas.clone()).unwrap();
        let world = builder.generate();
        let ascii = render_ascii(&world, &atlas);
        assert!(!ascii.is_empty());
        assert!(ascii.lines().all(|line| line.chars().count() == 64));
        assert!(ascii.contains('#'), "stone glyph missing:\n{ascii}");
    }
}
