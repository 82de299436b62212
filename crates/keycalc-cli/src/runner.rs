//! Command handlers

use crate::commands::{ConfigArgs, RunArgs, TuiArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use keycalc::config::CalcConfig;
use keycalc::core::Session;
use std::io::Write;

/// Replays a key script and writes the outcome
///
/// Plain output is the final display. `--trace` prefixes one line per key,
/// `--json` replaces everything with the session transcript. Quiet mode
/// never styles the display.
pub fn run_script(config: &CliConfig, args: &RunArgs, out: &mut impl Write) -> CliResult<()> {
    let capacity = args.capacity.unwrap_or(config.calc.transcript_capacity);
    tracing::info!(script = %args.script, capacity, "replaying script");

    let mut session = Session::with_capacity(capacity);
    session.run_script(&args.script)?;

    if args.json {
        writeln!(out, "{}", session.to_json()?)?;
        return Ok(());
    }

    if args.trace {
        for step in session.steps() {
            writeln!(out, "{}", step.display_line())?;
        }
    }

    let display = session.display();
    if config.color.should_color() && !config.verbosity.is_quiet() {
        writeln!(out, "{}", console::style(display).bold().force_styling(true))?;
    } else {
        writeln!(out, "{display}")?;
    }
    Ok(())
}

/// Writes the effective (or built-in) configuration as YAML
pub fn show_config(config: &CliConfig, args: &ConfigArgs, out: &mut impl Write) -> CliResult<()> {
    let calc = if args.defaults {
        CalcConfig::default()
    } else {
        config.calc.clone()
    };
    write!(out, "{}", calc.to_yaml()?)?;
    Ok(())
}

/// Applies `tui` flags on top of the loaded configuration
pub fn tui_config(base: CalcConfig, args: &TuiArgs) -> CliResult<CalcConfig> {
    let mut calc = base;
    if let Some(theme) = args.theme {
        calc = calc.with_theme(theme.into());
    }
    if let Some(frames) = args.flash_frames {
        calc = calc.with_flash_frames(frames);
    }
    if let Some(path) = &args.log_file {
        calc = calc.with_log_file(path);
    }
    calc.validate()?;
    Ok(calc)
}
