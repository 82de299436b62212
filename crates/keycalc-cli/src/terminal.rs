//! Interactive terminal session

use crate::error::{CliError, CliResult};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keycalc::config::CalcConfig;
use keycalc::tui::{render, CalculatorApp, InputHandler};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, IsTerminal};
use std::time::Duration;

/// How long to wait for input before advancing the key flash
pub const TICK: Duration = Duration::from_millis(50);

/// Runs the calculator until the user quits
pub fn run_tui(config: &CalcConfig) -> CliResult<()> {
    if !io::stdout().is_terminal() {
        return Err(CliError::terminal("stdout is not a terminal"));
    }

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = CalculatorApp::with_config(config);
    tracing::info!(theme = ?app.theme(), "terminal session started");
    let result = run_app(&mut terminal, &mut app);

    drop(guard);
    tracing::info!(presses = app.presses(), display = %app.display(), "terminal session ended");
    result
}

/// Raw mode, alternate screen and mouse capture, undone on drop so every
/// exit path restores the terminal
#[derive(Debug)]
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        ) {
            tracing::warn!(error = %e, "failed to restore terminal screen");
        }
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> CliResult<()> {
    let input = InputHandler::new();

    while !app.should_quit() {
        terminal.draw(|frame| render(app, frame))?;

        if !event::poll(TICK)? {
            app.tick();
            continue;
        }

        match event::read()? {
            Event::Key(key) => app.handle_action(input.handle_key(key)),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                if let Some(pressed) = app.handle_click(area, mouse.column, mouse.row) {
                    tracing::debug!(key = %pressed, "keypad clicked");
                }
            }
            _ => {}
        }
    }

    Ok(())
}
