//! Debug previews of generation data.
//!
//! Renders the biome grid, boolean masks and the placed world into
//! [`DebugImage`]s (RGBA, row 0 at the top, so world `y` is flipped), plus a
//! plain-text rendering for terminals. Callers decide how to persist them.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{
    MASK_CLEAR, MASK_SET, SKY, render_ascii, render_biome_grid, render_mask, render_world,
};
