//! TUI application state

use ratatui::layout::Rect;

use crate::config::{CalcConfig, Theme};
use crate::core::{format_display, Engine, Event};

use super::input::KeyAction;
use super::keypad::Keypad;
use super::ui::keypad_area;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: Engine,
    keypad: Keypad,
    theme: Theme,
    flash_frames: u8,
    presses: u64,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalcConfig::default())
    }

    /// Creates a calculator app from configuration
    #[must_use]
    pub fn with_config(config: &CalcConfig) -> Self {
        Self {
            engine: Engine::new(),
            keypad: Keypad::new(),
            theme: config.theme,
            flash_frames: config.flash_frames,
            presses: 0,
            should_quit: false,
        }
    }

    /// Returns the current display string
    #[must_use]
    pub fn display(&self) -> &str {
        self.engine.display()
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns the number of keys pressed this session
    #[must_use]
    pub fn presses(&self) -> u64 {
        self.presses
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Presses a calculator key
    pub fn press(&mut self, event: Event) {
        self.engine.apply(event);
        self.presses += 1;
        self.keypad
            .set_active_operator(self.engine.pending_operator());
        if self.theme.flashes() {
            self.keypad.flash_event(event, self.flash_frames);
        }
    }

    /// Handles a key action
    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(event) => self.press(event),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a mouse click at (x, y) inside a terminal of size `area`.
    ///
    /// Returns the event sent, if the click landed on a button.
    pub fn handle_click(&mut self, area: Rect, x: u16, y: u16) -> Option<Event> {
        let idx = self.keypad.hit_test(keypad_area(area), x, y)?;
        let event = self.keypad.get_button(idx)?.event;
        self.press(event);
        Some(event)
    }

    /// Advances animations by one frame
    pub fn tick(&mut self) {
        self.keypad.tick();
    }

    /// Returns the pending operation as shown above the keypad, e.g. `5 ×`
    #[must_use]
    pub fn pending_label(&self) -> Option<String> {
        self.engine
            .pending()
            .map(|p| format!("{} {}", format_display(p.operand), p.operator.glyph()))
    }
}
