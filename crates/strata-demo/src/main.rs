//! Demo binary that generates one tile world and previews it.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p strata-demo` for a random world.
//! Run with `cargo run -p strata-demo -- --seed 42 --png out` to also write PNG previews.

mod preview;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strata_config::{CliArgs, Config};
use strata_worldgen::{
    BiomeRegistry, GeneratedWorld, TileAtlas, WorldBuilder, debug_viz, default_tile_atlas,
};
use tracing::{info, warn};

/// Everything that can stop the demo.
#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("no config directory on this platform; pass --config <dir>")]
    NoConfigDir,
    #[error(transparent)]
    Config(#[from] strata_config::ConfigError),
    #[error("invalid world configuration: {0}")]
    World(#[from] strata_worldgen::ConfigError),
    #[error(transparent)]
    Preview(#[from] preview::PreviewError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), DemoError> {
    let config_dir: PathBuf = match &args.config {
        Some(dir) => dir.clone(),
        None => Config::default_dir().ok_or(DemoError::NoConfigDir)?,
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(args);

    let log_dir = config_dir.join("logs");
    if let Err(err) = strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("logging unavailable: {err}");
    }

    let atlas = default_tile_atlas();
    let mut builder = WorldBuilder::new(&config.world, atlas.clone())?;
    let world = builder.generate();
    log_summary(&world, builder.biomes());

    if config.preview.ascii {
        print!("{}", debug_viz::render_ascii(&world, &atlas));
    }

    if let Some(dir) = &config.preview.png_dir {
        write_previews(dir, &builder, &world, &atlas)?;
    }

    Ok(())
}

fn log_summary(world: &GeneratedWorld, biomes: &BiomeRegistry) {
    let stats = world.stats();
    info!(
        "World {}x{} (seed {}): {} tiles in {} chunks of {}",
        world.width(),
        world.height(),
        world.seed(),
        world.placement_count(),
        world.chunks().len(),
        world.chunk_size()
    );
    info!(
        "  Decorations: {} trees, {} cacti, {} tall grass",
        stats.trees, stats.cacti, stats.tall_grass
    );
    info!(
        "  Skipped: {} duplicates, {} outside chunks, {} missing kinds, {} carved by caves",
        stats.duplicates_skipped, stats.out_of_bounds, stats.missing_kind, stats.cave_suppressed
    );

    let grid = world.biome_grid();
    for (id, biome) in biomes.iter() {
        let cells = grid.count(id);
        let share = 100.0 * cells as f64 / (grid.width() as f64 * grid.height() as f64);
        info!("  Biome '{}': {cells} cells ({share:.1}%)", biome.name);
    }
    if stats.unclassifiable > 0 {
        warn!("{} biome cells fell back to a neighbor's biome", stats.unclassifiable);
    }
}

fn write_previews(
    dir: &std::path::Path,
    builder: &WorldBuilder,
    world: &GeneratedWorld,
    atlas: &TileAtlas,
) -> Result<(), DemoError> {
    preview::write(dir, "world", &debug_viz::render_world(world, atlas))?;
    preview::write(
        dir,
        "biomes",
        &debug_viz::render_biome_grid(world.biome_grid(), builder.biomes()),
    )?;

    if let Some(masks) = builder.masks() {
        preview::write(dir, "cave_mask", &debug_viz::render_mask(&masks.cave))?;
        for (slot, mask) in masks.ores.iter().enumerate() {
            let name = builder
                .plan()
                .ores
                .get(slot)
                .map_or_else(|| format!("ore_{slot}_mask"), |ore| format!("{}_mask", ore.name));
            preview::write(dir, &name, &debug_viz::render_mask(mask))?;
        }
    }

    info!("Wrote previews to {}", dir.display());
    Ok(())
}
