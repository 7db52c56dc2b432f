//! Application configuration for the strata tools.
//!
//! Settings persist to disk as `config.ron` and can be overridden from the
//! command line. Missing sections fall back to defaults and unknown fields are
//! ignored, so older and newer files both keep loading.

mod cli;
mod config;
mod error;

pub use cli::{ClassifierArg, CliArgs, MaskScopeArg};
pub use config::{CONFIG_FILE, Config, DebugConfig, PreviewConfig};
pub use error::ConfigError;
