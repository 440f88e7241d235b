//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so they never mix with rendered pages on stdout.
//!
//! # Log Levels
//!
//! - `warn` (default): dropped updates, fallbacks
//! - `info` (`-v`): page loads, API calls
//! - `debug` (`-vv`): table derivations, config sources
//! - `trace` (`-vvv`): state flushes, route matching
//!
//! `RUST_LOG`, when set, replaces the level chosen by `-v`.

use std::io;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub with_ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: Level::WARN,
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Maps the `-v` count to a level: none → warn, 1 → info, 2 → debug,
    /// 3+ → trace.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        LogConfig {
            level,
            ..LogConfig::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }
}

/// Builds the filter: `RUST_LOG` if set and valid, otherwise `level` for
/// this application's crates and `warn` for dependencies.
pub fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_ascii_lowercase();
        EnvFilter::new(format!(
            "warn,repodeck={level},repodeck_table={level},repodeck_url={level}"
        ))
    })
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}
