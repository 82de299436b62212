//! keycalc: four-function keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keycalc run "5+3*2="           # Replay keys, print the display
//! keycalc run "12+3=" --trace    # Show the display after every key
//! keycalc run "2*3=" --json      # Dump the session transcript
//! keycalc tui --theme glow       # Interactive keypad
//! keycalc config                 # Effective configuration as YAML
//! ```

use clap::Parser;
use keycalc::config::CalcConfig;
use keycalc_cli::{
    logging, runner, terminal, Cli, CliConfig, CliResult, ColorChoice, Commands, LogTarget,
    Verbosity,
};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match cli.command {
        Commands::Run(args) => {
            logging::init(config.verbosity, &LogTarget::for_command(&config.calc))?;
            let mut out = io::stdout().lock();
            runner::run_script(&config, &args, &mut out)?;
            out.flush()?;
            Ok(())
        }
        Commands::Tui(args) => {
            let calc = runner::tui_config(config.calc, &args)?;
            logging::init(config.verbosity, &LogTarget::for_tui(&calc))?;
            terminal::run_tui(&calc)
        }
        Commands::Config(args) => {
            logging::init(config.verbosity, &LogTarget::for_command(&config.calc))?;
            let mut out = io::stdout().lock();
            runner::show_config(&config, &args, &mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();
    let calc = CalcConfig::discover(cli.config.as_deref())?;

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_calc(calc))
}
