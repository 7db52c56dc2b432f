//! Tile kind atlas: maps compact [`TileKind`] values to the number of visual
//! variants the presentation layer provides for them.
//!
//! The generator never looks at sprites. It only asks how many variants a kind
//! has so it can pick one per placement; a kind with zero variants is treated
//! as missing and its placements are skipped.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compact identifier for a tile kind (stone, dirt, coal, leaf, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileKind(pub u16);

/// Descriptor for one tile kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileKindDef {
    /// Name used to reference the kind from configuration (e.g. "stone").
    pub name: String,
    /// Number of visual variants available for this kind. Zero means the
    /// presentation layer has no sprites for it.
    pub variants: u16,
    /// Color used by the debug image renderers.
    pub preview_color: [u8; 3],
    /// Character used by the ASCII renderer.
    pub glyph: char,
}

impl TileKindDef {
    /// Convenience constructor.
    pub fn new(name: &str, variants: u16, preview_color: [u8; 3], glyph: char) -> Self {
        Self {
            name: name.to_string(),
            variants,
            preview_color,
            glyph,
        }
    }
}

/// Errors that can occur while registering tile kinds.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// A kind with this name is already registered.
    #[error("duplicate tile kind name: {0}")]
    DuplicateName(String),
    /// All 65 536 slots have been consumed.
    #[error("tile atlas is full (max 65536 kinds)")]
    AtlasFull,
}

/// Registry of tile kinds with O(1) lookup by [`TileKind`] and by name.
#[derive(Clone, Debug, Default)]
pub struct TileAtlas {
    kinds: Vec<TileKindDef>,
    name_to_kind: HashMap<String, TileKind>,
}

impl TileAtlas {
    /// Creates an empty atlas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tile kind and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::DuplicateName`] if the name is taken, or
    /// [`AtlasError::AtlasFull`] once every `u16` slot is in use.
    pub fn register(&mut self, def: TileKindDef) -> Result<TileKind, AtlasError> {
        if self.name_to_kind.contains_key(&def.name) {
            return Err(AtlasError::DuplicateName(def.name));
        }
        if self.kinds.len() > u16::MAX as usize {
            return Err(AtlasError::AtlasFull);
        }

        let kind = TileKind(self.kinds.len() as u16);
        self.name_to_kind.insert(def.name.clone(), kind);
        self.kinds.push(def);
        Ok(kind)
    }

    /// Returns the descriptor for `kind`, or `None` if it was never registered.
    pub fn get(&self, kind: TileKind) -> Option<&TileKindDef> {
        self.kinds.get(kind.0 as usize)
    }

    /// Looks up a kind by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<TileKind> {
        self.name_to_kind.get(name).copied()
    }

    /// Number of visual variants for `kind`; zero for unknown kinds.
    pub fn variant_count(&self, kind: TileKind) -> u16 {
        self.get(kind).map_or(0, |def| def.variants)
    }

    /// Iterates over all registered kinds in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TileKind, &TileKindDef)> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(i, def)| (TileKind(i as u16), def))
    }

    /// Returns the number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no kinds are registered.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// The tile kinds referenced by the default world content.
pub fn default_tile_kinds() -> Vec<TileKindDef> {
    vec![
        TileKindDef::new("grass", 3, [86, 170, 60], '"'),
        TileKindDef::new("dirt", 2, [134, 96, 67], '%'),
        TileKindDef::new("stone", 4, [120, 120, 124], '#'),
        TileKindDef::new("sand", 2, [219, 200, 140], ':'),
        TileKindDef::new("sandstone", 2, [196, 170, 110], '='),
        TileKindDef::new("snow", 2, [240, 245, 250], '~'),
        TileKindDef::new("log", 2, [101, 67, 33], '|'),
        TileKindDef::new("leaf", 3, [46, 125, 50], '*'),
        TileKindDef::new("tall_grass", 4, [120, 200, 80], ','),
        TileKindDef::new("cactus", 2, [60, 140, 70], '!'),
        TileKindDef::new("coal", 2, [40, 40, 40], 'c'),
        TileKindDef::new("iron", 2, [200, 160, 130], 'i'),
        TileKindDef::new("gold", 2, [240, 200, 40], 'g'),
        TileKindDef::new("diamond", 1, [90, 220, 230], 'd'),
    ]
}

/// Builds an atlas holding [`default_tile_kinds`].
pub fn default_tile_atlas() -> TileAtlas {
    let mut atlas = TileAtlas::new();
    for def in default_tile_kinds() {
        if let Err(err) = atlas.register(def) {
            tracing::warn!("skipping default tile kind: {err}");
        }
    }
    atlas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut atlas = TileAtlas::new();
        let a = atlas
            .register(TileKindDef::new("stone", 4, [0, 0, 0], '#'))
            .unwrap();
        let b = atlas
            .register(TileKindDef::new("dirt", 2, [0, 0, 0], '%'))
            .unwrap();
        assert_eq!(a, TileKind(0));
        assert_eq!(b, TileKind(1));
        assert_eq!(atlas.len(), 2);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut atlas = TileAtlas::new();
        atlas
            .register(TileKindDef::new("stone", 1, [0, 0, 0], '#'))
            .unwrap();
        let result = atlas.register(TileKindDef::new("stone", 3, [1, 1, 1], '#'));
        assert!(matches!(result, Err(AtlasError::DuplicateName(name)) if name == "stone"));
    }

    #[test]
    fn test_unknown_kind_has_no_variants() {
        let atlas = default_tile_atlas();
        assert_eq!(atlas.variant_count(TileKind(9_999)), 0);
        assert!(atlas.get(TileKind(9_999)).is_none());
    }

    #[test]
    fn test_default_atlas_resolves_every_default_name() {
        let atlas = default_tile_atlas();
        for def in default_tile_kinds() {
            let kind = atlas
                .lookup_by_name(&def.name)
                .unwrap_or_else(|| panic!("default kind '{}' missing", def.name));
            assert_eq!(atlas.variant_count(kind), def.variants);
        }
    }
}
