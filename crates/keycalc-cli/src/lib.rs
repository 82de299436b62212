//! keycalc CLI library
//!
//! Command-line and terminal front ends for the keycalc calculator.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod logging;
pub mod runner;
pub mod terminal;

pub use commands::{Cli, ColorArg, Commands, ConfigArgs, RunArgs, ThemeArg, TuiArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::{LogTarget, LOG_ENV};
