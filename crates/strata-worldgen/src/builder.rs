//! World generation orchestration.
//!
//! [`WorldBuilder`] walks a run through its stages:
//!
//! ```text
//! Uninitialized -> MasksBuilt -> ChunksCreated -> TerrainGenerated -> Done
//! ```
//!
//! Every stage recomputes its output from scratch and runs any earlier stage
//! it depends on, so the same builder can be driven repeatedly for previews
//! after a parameter change.

use std::time::Instant;

use crate::biome::{BiomeClassifier, BiomeGrid, BiomeId, BiomeRegistry, ClassificationStats};
use crate::chunk::{Chunk, TilePlacement};
use crate::column::{classify_cell, material_kind};
use crate::config::WorldConfig;
use crate::decoration::decorate_column;
use crate::error::{ConfigError, PlacementError};
use crate::height::{HeightProfile, top_row};
use crate::mask::{MaskGenerator, MaskScope, WorldMasks};
use crate::noise_field::NoiseField;
use crate::plan::GenerationPlan;
use crate::placement::WorldTiles;
use crate::seed::resolve_seed;
use crate::tile::{TileAtlas, TileKind};
use crate::world::{GeneratedWorld, GenerationStats};

/// Progress of a generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildStage {
    /// Nothing computed yet.
    Uninitialized,
    /// Biome grid, cave mask and ore masks are ready.
    MasksBuilt,
    /// Empty chunks exist; tiles can be placed.
    ChunksCreated,
    /// Every column has been filled and decorated.
    TerrainGenerated,
    /// A [`GeneratedWorld`] has been produced.
    Done,
}

/// Generates one world at a time from a validated configuration.
///
/// Each builder owns its noise field, masks and placement state; independent
/// builders can run on different threads.
pub struct WorldBuilder {
    plan: GenerationPlan,
    atlas: TileAtlas,
    seed: u64,
    field: NoiseField,
    stage: BuildStage,
    biome_grid: Option<BiomeGrid>,
    classification: ClassificationStats,
    masks: Option<WorldMasks>,
    tiles: Option<WorldTiles>,
    heights: Vec<f64>,
}

impl WorldBuilder {
    /// Validates `config` against `atlas`. An unset seed is drawn here, once.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first inconsistent parameter.
    pub fn new(config: &WorldConfig, atlas: TileAtlas) -> Result<Self, ConfigError> {
        let plan = config.validate(&atlas)?;
        let seed = resolve_seed(plan.seed);
        Ok(Self {
            plan,
            atlas,
            seed,
            field: NoiseField::new(seed),
            stage: BuildStage::Uninitialized,
            biome_grid: None,
            classification: ClassificationStats::default(),
            masks: None,
            tiles: None,
            heights: Vec::new(),
        })
    }

    /// Replaces the configuration and resets to [`BuildStage::Uninitialized`].
    /// On error the builder keeps its previous configuration and state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first inconsistent parameter.
    pub fn reconfigure(&mut self, config: &WorldConfig) -> Result<(), ConfigError> {
        let plan = config.validate(&self.atlas)?;
        self.seed = resolve_seed(plan.seed);
        self.plan = plan;
        self.field = NoiseField::new(self.seed);
        self.reset();
        tracing::debug!(seed = self.seed, "builder reconfigured");
        Ok(())
    }

    /// Switches to another seed and resets to [`BuildStage::Uninitialized`].
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.field = NoiseField::new(seed);
        self.reset();
    }

    fn reset(&mut self) {
        self.stage = BuildStage::Uninitialized;
        self.biome_grid = None;
        self.classification = ClassificationStats::default();
        self.masks = None;
        self.tiles = None;
        self.heights.clear();
    }

    /// Current stage.
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Seed of the current run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Tile kinds placements resolve against.
    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    /// The validated configuration.
    pub fn plan(&self) -> &GenerationPlan {
        &self.plan
    }

    /// Resolved biomes.
    pub fn biomes(&self) -> &BiomeRegistry {
        &self.plan.biomes
    }

    /// The biome grid, once masks are built.
    pub fn biome_grid(&self) -> Option<&BiomeGrid> {
        self.biome_grid.as_ref()
    }

    /// Cave and ore masks, once built.
    pub fn masks(&self) -> Option<&WorldMasks> {
        self.masks.as_ref()
    }

    /// Chunks, once created.
    pub fn chunks(&self) -> Option<&[Chunk]> {
        self.tiles.as_ref().map(WorldTiles::chunks)
    }

    /// Counters of the current run so far.
    pub fn stats(&self) -> GenerationStats {
        self.tiles
            .as_ref()
            .map(|t| t.stats().clone())
            .unwrap_or_default()
    }

    /// Builds the biome grid and every mask, discarding later stages.
    pub fn build_masks(&mut self) {
        let plan = &self.plan;
        let mut classifier =
            BiomeClassifier::new(plan.classifier, plan.biomes.reference_colors());
        let (grid, classification) = BiomeGrid::build(
            &self.field,
            plan.biome_frequency,
            &plan.gradient,
            &mut classifier,
            plan.width,
            plan.height,
        );
        if classification.unclassifiable > 0 || classification.distant > 0 {
            tracing::warn!(
                unclassifiable = classification.unclassifiable,
                distant = classification.distant,
                "biome classification was inexact for some cells"
            );
        }

        let generator = MaskGenerator::new(&self.field, plan.width, plan.height);
        let masks = WorldMasks::build(
            &generator,
            plan.mask_scope,
            plan.cave,
            &plan.ores,
            &grid,
            &plan.biomes,
        );

        self.biome_grid = Some(grid);
        self.classification = classification;
        self.masks = Some(masks);
        self.tiles = None;
        self.heights.clear();
        self.stage = BuildStage::MasksBuilt;
        tracing::debug!(seed = self.seed, scope = ?self.plan.mask_scope, "masks built");
    }

    /// Creates empty chunks, building masks first if needed. Discards any
    /// placed tiles.
    pub fn create_chunks(&mut self) {
        if self.stage == BuildStage::Uninitialized {
            self.build_masks();
        }
        let index = self.plan.chunk_index;
        let mut tiles = WorldTiles::new(index, self.seed);
        let stats = tiles.stats_mut();
        stats.unclassifiable = self.classification.unclassifiable;
        stats.distant_matches = self.classification.distant;

        self.tiles = Some(tiles);
        self.heights.clear();
        self.stage = BuildStage::ChunksCreated;
        tracing::debug!(chunks = index.num_chunks(), "chunks created");
    }

    /// Fills and decorates every column into freshly created chunks.
    pub fn generate_terrain(&mut self) {
        if self.stage != BuildStage::ChunksCreated {
            self.create_chunks();
        }
        let (Some(grid), Some(masks), Some(tiles)) = (
            self.biome_grid.as_ref(),
            self.masks.as_ref(),
            self.tiles.as_mut(),
        ) else {
            return;
        };

        self.heights = fill_columns(&self.plan, &self.atlas, &self.field, grid, masks, tiles);

        let stats = tiles.stats();
        if stats.out_of_bounds > 0 || stats.missing_kind > 0 {
            tracing::warn!(
                out_of_bounds = stats.out_of_bounds,
                missing_kind = stats.missing_kind,
                "some placements were skipped"
            );
        }
        self.stage = BuildStage::TerrainGenerated;
        tracing::debug!(placed = stats.placed, "terrain generated");
    }

    /// Packages the run into a [`GeneratedWorld`], generating terrain first if
    /// needed.
    pub fn finish(&mut self) -> GeneratedWorld {
        if self.stage < BuildStage::TerrainGenerated {
            self.generate_terrain();
        }
        let (chunks, stats) = self
            .tiles
            .as_ref()
            .map(|t| (t.chunks().to_vec(), t.stats().clone()))
            .unwrap_or_default();
        let grid = self
            .biome_grid
            .clone()
            .unwrap_or_else(|| BiomeGrid::uniform(self.plan.width, self.plan.height, BiomeId(0)));

        self.stage = BuildStage::Done;
        GeneratedWorld::new(
            self.seed,
            (self.plan.width, self.plan.height, self.plan.chunk_index.chunk_size()),
            chunks,
            grid,
            self.heights.clone(),
            stats,
        )
    }

    /// Runs every stage from scratch and returns the world.
    pub fn generate(&mut self) -> GeneratedWorld {
        let start = Instant::now();
        self.build_masks();
        self.generate_terrain();
        let world = self.finish();
        tracing::info!(
            seed = world.seed(),
            placements = world.placement_count(),
            "world generated in {:.2?}",
            start.elapsed()
        );
        world
    }

    /// Places a single tile outside the column pass, creating chunks first if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns whatever [`WorldTiles::place`] rejects.
    pub fn place_tile(
        &mut self,
        kind: TileKind,
        x: i32,
        y: i32,
    ) -> Result<TilePlacement, PlacementError> {
        if self.stage < BuildStage::ChunksCreated {
            self.create_chunks();
        }
        let tiles = self
            .tiles
            .get_or_insert_with(|| WorldTiles::new(self.plan.chunk_index, self.seed));
        tiles.place(&self.atlas, kind, x, y)
    }
}

/// The column pass. Returns the continuous height of every column.
fn fill_columns(
    plan: &GenerationPlan,
    atlas: &TileAtlas,
    field: &NoiseField,
    grid: &BiomeGrid,
    masks: &WorldMasks,
    tiles: &mut WorldTiles,
) -> Vec<f64> {
    let profile = HeightProfile::new(field, plan.height_addition);
    let mut heights = Vec::with_capacity(plan.width as usize);

    for x in 0..plan.width {
        let column_biome = plan.biomes.get(grid.get(x as i32, 0));
        let height = profile.height_at(x, column_biome);
        heights.push(height);
        let Some(top) = top_row(height) else {
            continue;
        };

        let x = x as i32;
        for y in 0..=top {
            let row = y as i32;
            let biome = plan.biomes.get(grid.get(x, row));
            let ores = match plan.mask_scope {
                MaskScope::Global => plan.ores.as_slice(),
                MaskScope::PerBiome => biome.ores_or(&plan.ores),
            };
            let material = classify_cell(y, height, biome, ores, |n| masks.ore(n, x, row));

            let carves = plan.generate_caves && biome.generate_caves;
            if carves && !masks.cave.get(x, row) {
                tiles.stats_mut().cave_suppressed += 1;
            } else if let Some(kind) = material_kind(material, biome, ores) {
                tiles.place_or_skip(atlas, kind, x, row);
            }

            if y == top {
                decorate_column(tiles, atlas, biome, x, row);
            }
        }
    }

    heights
}
