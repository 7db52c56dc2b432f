//! Command-line overrides for `config.ron`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strata_worldgen::{ClassifierStrategy, MaskScope};

use crate::Config;

/// Strata world generator command-line arguments.
///
/// Values given here override the matching settings of `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata-demo", about = "Generate a 2D tile world")]
pub struct CliArgs {
    /// World width in cells.
    #[arg(long)]
    pub width: Option<u32>,

    /// Grid height in cells.
    #[arg(long)]
    pub height: Option<u32>,

    /// Cells per chunk.
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// World seed. Omit (and leave unset in the config) for a random one.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Carve caves.
    #[arg(long)]
    pub caves: Option<bool>,

    /// Where mask parameters come from.
    #[arg(long, value_enum)]
    pub mask_scope: Option<MaskScopeArg>,

    /// Biome classification strategy.
    #[arg(long, value_enum)]
    pub classifier: Option<ClassifierArg>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write PNG previews into this directory.
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Don't print the ASCII rendering.
    #[arg(long)]
    pub no_ascii: bool,
}

/// `--mask-scope` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MaskScopeArg {
    /// One threshold per mask for the whole grid.
    Global,
    /// Thresholds of each cell's biome.
    PerBiome,
}

/// `--classifier` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ClassifierArg {
    /// Closest reference color.
    Nearest,
    /// Exact color match with fallback.
    Exact,
}

impl From<MaskScopeArg> for MaskScope {
    fn from(arg: MaskScopeArg) -> Self {
        match arg {
            MaskScopeArg::Global => Self::Global,
            MaskScopeArg::PerBiome => Self::PerBiome,
        }
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let world = &mut self.world;
        if let Some(width) = args.width {
            world.width = width;
        }
        if let Some(height) = args.height {
            world.height = Some(height);
        }
        if let Some(chunk_size) = args.chunk_size {
            world.chunk_size = chunk_size;
        }
        if let Some(seed) = args.seed {
            world.seed = Some(seed);
        }
        if let Some(caves) = args.caves {
            world.generate_caves = caves;
        }
        if let Some(scope) = args.mask_scope {
            world.mask_scope = scope.into();
        }
        match args.classifier {
            // Keep a configured warning distance when switching back to nearest.
            Some(ClassifierArg::Nearest) => {
                if !matches!(world.classifier, ClassifierStrategy::NearestColor { .. }) {
                    world.classifier = ClassifierStrategy::default();
                }
            }
            Some(ClassifierArg::Exact) => world.classifier = ClassifierStrategy::ExactMatch,
            None => {}
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.png {
            self.preview.png_dir = Some(dir.clone());
        }
        if args.no_ascii {
            self.preview.ascii = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "strata-demo",
            "--width",
            "256",
            "--seed",
            "42",
            "--caves",
            "false",
            "--mask-scope",
            "global",
            "--classifier",
            "exact",
            "--png",
            "previews",
            "--no-ascii",
        ]);
        config.apply_cli_overrides(&args);

        assert_eq!(config.world.width, 256);
        assert_eq!(config.world.seed, Some(42));
        assert!(!config.world.generate_caves);
        assert_eq!(config.world.mask_scope, MaskScope::Global);
        assert_eq!(config.world.classifier, ClassifierStrategy::ExactMatch);
        assert_eq!(config.preview.png_dir, Some(PathBuf::from("previews")));
        assert!(!config.preview.ascii);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.chunk_size, 16);
        assert_eq!(config.world.height, None);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_height_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::parse_from(["strata-demo", "--height", "90"]));
        assert_eq!(config.world.height, Some(90));
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_nearest_keeps_configured_distance() {
        let mut config = Config::default();
        config.world.classifier = ClassifierStrategy::NearestColor {
            warn_distance: Some(0.9),
        };
        config.apply_cli_overrides(&CliArgs::parse_from(["strata-demo", "--classifier", "nearest"]));
        assert_eq!(
            config.world.classifier,
            ClassifierStrategy::NearestColor {
                warn_distance: Some(0.9)
            }
        );
    }

    #[test]
    fn test_per_biome_value_name() {
        let args = CliArgs::parse_from(["strata-demo", "--mask-scope", "per-biome"]);
        assert_eq!(args.mask_scope, Some(MaskScopeArg::PerBiome));
    }
}
