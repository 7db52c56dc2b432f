//! Biome registry: maps [`BiomeId`] to [`Biome`] with name-based lookup.

use hashbrown::HashMap;

use super::{Biome, Rgb};

/// Unique identifier for a biome, assigned in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

/// Errors that can occur when registering biomes.
#[derive(Debug, thiserror::Error)]
pub enum BiomeRegistryError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
    /// More biomes than a [`BiomeId`] can address.
    #[error("too many biomes (max 65536)")]
    Full,
}

/// Stores the biomes of one world.
#[derive(Clone, Debug, Default)]
pub struct BiomeRegistry {
    biomes: Vec<Biome>,
    name_to_id: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a biome, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// Returns [`BiomeRegistryError::DuplicateName`] if a biome with the same name exists.
    pub fn register(&mut self, biome: Biome) -> Result<BiomeId, BiomeRegistryError> {
        if self.name_to_id.contains_key(&biome.name) {
            return Err(BiomeRegistryError::DuplicateName(biome.name));
        }
        if self.biomes.len() > u16::MAX as usize {
            return Err(BiomeRegistryError::Full);
        }
        let id = BiomeId(self.biomes.len() as u16);
        self.name_to_id.insert(biome.name.clone(), id);
        self.biomes.push(biome);
        Ok(id)
    }

    /// Returns the biome for the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this registry.
    pub fn get(&self, id: BiomeId) -> &Biome {
        &self.biomes[id.0 as usize]
    }

    /// Looks up a biome ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Iterates over `(id, biome)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &Biome)> {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, biome)| (BiomeId(i as u16), biome))
    }

    /// Reference colors paired with their biome, in registration order.
    pub fn reference_colors(&self) -> Vec<(BiomeId, Rgb)> {
        self.iter().map(|(id, biome)| (id, biome.color)).collect()
    }

    /// Largest height multiplier of any biome.
    pub fn max_height_multiplier(&self) -> f64 {
        self.biomes
            .iter()
            .map(|b| b.height_multiplier)
            .fold(0.0, f64::max)
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}
