//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use keycalc::config::Theme;
use std::path::PathBuf;

/// keycalc: four-function keypad calculator
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only, unstyled output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Configuration file (YAML); defaults to $KEYCALC_CONFIG
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a key script and print the display
    ///
    /// Keys: 0-9 . + - * / = % AC (or c) +/- (or n)
    Run(RunArgs),

    /// Open the interactive terminal calculator
    Tui(TuiArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Key script, e.g. "5+3*2="
    #[arg(allow_hyphen_values = true)]
    pub script: String,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Print the session transcript as JSON
    #[arg(long, conflicts_with = "trace")]
    pub json: bool,

    /// Maximum number of steps kept in the transcript
    #[arg(long)]
    pub capacity: Option<usize>,
}

/// Arguments for the tui command
#[derive(Parser, Debug)]
pub struct TuiArgs {
    /// Keypad theme
    #[arg(long)]
    pub theme: Option<ThemeArg>,

    /// Frames a pressed key stays lit (glow theme)
    #[arg(long)]
    pub flash_frames: Option<u8>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show built-in defaults, ignoring any configuration file
    #[arg(long)]
    pub defaults: bool,
}

/// Keypad theme argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeArg {
    /// Flat keypad
    Plain,
    /// Pressed keys flash
    Glow,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Plain => Self::Plain,
            ThemeArg::Glow => Self::Glow,
        }
    }
}

/// Color output argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
