//! Structured logging setup

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};
use keycalc::config::CalcConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable overriding the verbosity flags, e.g. `KEYCALC_LOG=keycalc=trace`
pub const LOG_ENV: &str = "KEYCALC_LOG";

/// Where log records go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// Appended to a file
    File(PathBuf),
    /// Discarded
    Off,
}

impl LogTarget {
    /// Target for line-oriented commands
    #[must_use]
    pub fn for_command(config: &CalcConfig) -> Self {
        config
            .log_file
            .clone()
            .map_or(Self::Stderr, Self::File)
    }

    /// Target while the terminal UI owns the screen
    #[must_use]
    pub fn for_tui(config: &CalcConfig) -> Self {
        config.log_file.clone().map_or(Self::Off, Self::File)
    }
}

/// Builds the filter from `$KEYCALC_LOG`, falling back to the verbosity level
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Installs the global subscriber
pub fn init(verbosity: Verbosity, target: &LogTarget) -> CliResult<()> {
    let filter = env_filter(verbosity);
    let result = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .try_init()
        }
    };
    result.map_err(|e| CliError::logging(e.to_string()))
}
