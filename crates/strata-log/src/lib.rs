//! `tracing` subscriber setup for the strata tools.
//!
//! Console output is human-readable with uptime timestamps. Debug builds can
//! additionally write JSON lines to `strata.log` for post-mortem analysis.
//! `RUST_LOG` always wins over the configured level.

use std::fs::File;
use std::path::Path;

use strata_config::Config;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE: &str = "strata.log";

/// Filter directives for `config`: its `debug.log_level` unless empty.
pub fn filter_directives(config: Option<&Config>) -> &str {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.as_str()
        }
        _ => DEFAULT_FILTER,
    }
}

/// Creates `log_dir` and a fresh [`LOG_FILE`] inside it.
pub fn create_log_file(log_dir: &Path) -> std::io::Result<File> {
    std::fs::create_dir_all(log_dir)?;
    File::create(log_dir.join(LOG_FILE))
}

/// JSON-lines layer writing to `file`, without ANSI colors.
pub fn json_file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json()
}

/// Installs the global subscriber.
///
/// * `log_dir` - directory for the JSON log file
/// * `debug_build` - only debug builds write the file
/// * `config` - source of the default log level
///
/// A log file that cannot be created is reported on stderr and skipped.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use strata_config::Config;
/// use strata_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config))?;
/// # Ok::<(), tracing_subscriber::util::TryInitError>(())
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build && let Some(log_dir) = log_dir {
        match create_log_file(log_dir) {
            Ok(log_file) => return subscriber.with(json_file_layer(log_file)).try_init(),
            Err(err) => eprintln!("not writing {LOG_FILE} to {}: {err}", log_dir.display()),
        }
    }

    subscriber.try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_without_config() {
        assert_eq!(filter_directives(None), "info");
    }

    #[test]
    fn test_config_level_is_used() {
        let mut config = Config::default();
        config.debug.log_level = "warn,strata_worldgen=debug".to_string();
        assert_eq!(filter_directives(Some(&config)), "warn,strata_worldgen=debug");
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_filters_parse() {
        for directives in ["info", "debug,strata_worldgen=trace", "warn,strata_config=debug"] {
            assert!(
                EnvFilter::try_new(directives).is_ok(),
                "Failed to parse filter: {directives}"
            );
        }
    }

    #[test]
    fn test_log_file_created_in_nested_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("logs");
        create_log_file(&log_dir).unwrap();
        assert!(log_dir.join(LOG_FILE).exists());
    }

    #[test]
    fn test_file_layer_writes_json_lines() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = create_log_file(temp_dir.path()).unwrap();
        let subscriber = tracing_subscriber::registry().with(json_file_layer(file));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(seed = 7u64, "world generated");
        });

        let contents = std::fs::read_to_string(temp_dir.path().join(LOG_FILE)).unwrap();
        let line = contents.lines().next().expect("one log line");
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["level"], "INFO");
        assert_eq!(event["fields"]["message"], "world generated");
        assert_eq!(event["fields"]["seed"], 7);
    }

    #[test]
    fn test_second_init_fails_instead_of_panicking() {
        let _ = init_logging(None, false, None);
        assert!(init_logging(None, false, None).is_err());
    }
}
