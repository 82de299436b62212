//! Keypad for the terminal calculator
//!
//! The classic four-column layout:
//!
//! ```text
//! [ AC ] [+/-] [ % ] [ ÷ ]
//! [ 7  ] [ 8 ] [ 9 ] [ × ]
//! [ 4  ] [ 5 ] [ 6 ] [ − ]
//! [ 1  ] [ 2 ] [ 3 ] [ + ]
//! [    0     ] [ . ] [ = ]
//! ```
//!
//! Buttons can be clicked with the mouse, flash when pressed (glow theme) and
//! the operator awaiting its second operand stays lit.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::config::Theme;
use crate::core::{Event, Operator};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The event this button sends
    pub event: Event,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column of the left edge (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
    /// Frames left in the press flash
    pub glow: u8,
    /// Whether this is the pending operator
    pub active: bool,
}

impl KeypadButton {
    /// Creates a one-column button
    #[must_use]
    pub fn new(event: Event, row: usize, col: usize) -> Self {
        Self {
            event,
            row,
            col,
            span: 1,
            glow: 0,
            active: false,
        }
    }

    /// Sets the column span
    #[must_use]
    pub fn spanning(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    /// Returns the button label
    #[must_use]
    pub fn label(&self) -> String {
        self.event.label()
    }

    /// Returns true while the press flash is visible
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.glow > 0
    }

    /// Returns true if the button covers grid cell (row, col)
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }
}

/// The keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use Operator::{Add, Divide, Multiply, Subtract};

        let d = Event::digit;
        let buttons = vec![
            // Row 0: AC +/- % ÷
            KeypadButton::new(Event::Clear, 0, 0),
            KeypadButton::new(Event::ToggleSign, 0, 1),
            KeypadButton::new(Event::Percent, 0, 2),
            KeypadButton::new(Event::Operator(Divide), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButton::new(d(7), 1, 0),
            KeypadButton::new(d(8), 1, 1),
            KeypadButton::new(d(9), 1, 2),
            KeypadButton::new(Event::Operator(Multiply), 1, 3),
            // Row 2: 4 5 6 −
            KeypadButton::new(d(4), 2, 0),
            KeypadButton::new(d(5), 2, 1),
            KeypadButton::new(d(6), 2, 2),
            KeypadButton::new(Event::Operator(Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButton::new(d(1), 3, 0),
            KeypadButton::new(d(2), 3, 1),
            KeypadButton::new(d(3), 3, 2),
            KeypadButton::new(Event::Operator(Add), 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButton::new(d(0), 4, 0).spanning(2),
            KeypadButton::new(Event::Decimal, 4, 2),
            KeypadButton::new(Event::Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets the index of the button covering a grid cell
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons.iter().position(|b| b.covers(row, col))
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.index_at(row, col).and_then(|i| self.buttons.get(i))
    }

    /// Finds the button that sends `event`
    #[must_use]
    pub fn find_button(&self, event: Event) -> Option<usize> {
        self.buttons.iter().position(|b| b.event == event)
    }

    /// Lights a button for `frames` frames
    pub fn flash(&mut self, index: usize, frames: u8) {
        if let Some(btn) = self.buttons.get_mut(index) {
            btn.glow = frames;
        }
    }

    /// Lights the button for `event`, if it is on the keypad
    pub fn flash_event(&mut self, event: Event, frames: u8) {
        if let Some(idx) = self.find_button(event) {
            self.flash(idx, frames);
        }
    }

    /// Advances the flash animation by one frame
    pub fn tick(&mut self) {
        for btn in &mut self.buttons {
            btn.glow = btn.glow.saturating_sub(1);
        }
    }

    /// Marks the pending operator's button
    pub fn set_active_operator(&mut self, operator: Option<Operator>) {
        for btn in &mut self.buttons {
            btn.active = matches!(btn.event, Event::Operator(op) if Some(op) == operator);
        }
    }

    /// Returns the button of the pending operator
    #[must_use]
    pub fn active_button(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.active)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Converts a click position to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;

        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;

        self.index_at(row, col)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    theme: Theme,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad, theme: Theme) -> Self {
        Self { keypad, theme }
    }

    fn button_style(&self, btn: &KeypadButton) -> Style {
        if btn.is_pressed() && self.theme.flashes() {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD);
        }
        if btn.active {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match btn.event {
            Event::Digit(_) | Event::Decimal => Style::default().fg(Color::White),
            Event::Operator(_) => Style::default().fg(Color::Yellow),
            Event::Equals => Style::default().fg(Color::Green),
            Event::Clear => Style::default().fg(Color::Red),
            Event::ToggleSign | Event::Percent => Style::default().fg(Color::Cyan),
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = match self.theme {
            Theme::Plain => Color::DarkGray,
            Theme::Glow => Color::Magenta,
        };
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for btn in self.keypad.buttons() {
            let x = inner.x + btn.col as u16 * btn_width;
            let y = inner.y + btn.row as u16 * btn_height + btn_height / 2;
            let width = btn_width * btn.span as u16;

            let label = format!("[{}]", btn.label());
            let label_len = label.chars().count() as u16;
            let text = if label_len <= width { label } else { btn.label() };
            let text_len = text.chars().count() as u16;
            let label_x = x + width.saturating_sub(text_len) / 2;

            if y < inner.y + inner.height && label_x < inner.x + inner.width {
                buf.set_span(label_x, y, &Span::styled(text, self.button_style(btn)), width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== KeypadButton tests =====

    #[test]
    fn test_button_defaults() {
        let btn = KeypadButton::new(Event::digit(5), 2, 1);
        assert_eq!(btn.span, 1);
        assert!(!btn.is_pressed());
        assert!(!btn.active);
        assert_eq!(btn.label(), "5");
    }

    #[test]
    fn test_button_spanning_minimum_one() {
        let btn = KeypadButton::new(Event::digit(0), 4, 0).spanning(0);
        assert_eq!(btn.span, 1);
    }

    #[test]
    fn test_button_covers_span() {
        let btn = KeypadButton::new(Event::digit(0), 4, 0).spanning(2);
        assert!(btn.covers(4, 0));
        assert!(btn.covers(4, 1));
        assert!(!btn.covers(4, 2));
        assert!(!btn.covers(3, 0));
    }

    // ===== Keypad layout tests =====

    #[test]
    fn test_keypad_layout() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 19);
        assert_eq!(keypad.dimensions(), (5, 4));
    }

    #[test]
    fn test_keypad_every_cell_covered_once() {
        let keypad = Keypad::new();
        for row in 0..5 {
            for col in 0..4 {
                let covering = keypad.buttons().filter(|b| b.covers(row, col)).count();
                assert_eq!(covering, 1, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_keypad_top_row() {
        let keypad = Keypad::new();
        let labels: Vec<String> = (0..4)
            .map(|c| keypad.get_button_at(0, c).unwrap().label())
            .collect();
        assert_eq!(labels, vec!["AC", "+/-", "%", "÷"]);
    }

    #[test]
    fn test_keypad_wide_zero() {
        let keypad = Keypad::new();
        assert_eq!(keypad.index_at(4, 0), keypad.index_at(4, 1));
        assert_eq!(keypad.get_button_at(4, 1).unwrap().event, Event::digit(0));
    }

    #[test]
    fn test_keypad_out_of_grid() {
        let keypad = Keypad::new();
        assert!(keypad.get_button_at(5, 0).is_none());
        assert!(keypad.get_button_at(0, 4).is_none());
        assert!(keypad.get_button(19).is_none());
    }

    #[test]
    fn test_keypad_has_every_event_kind() {
        let keypad = Keypad::new();
        for d in 0..=9 {
            assert!(keypad.find_button(Event::digit(d)).is_some());
        }
        for op in Operator::ALL {
            assert!(keypad.find_button(Event::Operator(op)).is_some());
        }
        for event in [
            Event::Decimal,
            Event::Equals,
            Event::Clear,
            Event::ToggleSign,
            Event::Percent,
        ] {
            assert!(keypad.find_button(event).is_some());
        }
    }

    // ===== Flash tests =====

    #[test]
    fn test_flash_and_tick() {
        let mut keypad = Keypad::new();
        keypad.flash_event(Event::digit(7), 2);
        let idx = keypad.find_button(Event::digit(7)).unwrap();
        assert!(keypad.get_button(idx).unwrap().is_pressed());
        keypad.tick();
        assert!(keypad.get_button(idx).unwrap().is_pressed());
        keypad.tick();
        assert!(!keypad.get_button(idx).unwrap().is_pressed());
        keypad.tick();
        assert_eq!(keypad.get_button(idx).unwrap().glow, 0);
    }

    #[test]
    fn test_flash_invalid_index_ignored() {
        let mut keypad = Keypad::new();
        keypad.flash(100, 5);
        assert!(keypad.buttons().all(|b| !b.is_pressed()));
    }

    // ===== Active operator tests =====

    #[test]
    fn test_set_active_operator() {
        let mut keypad = Keypad::new();
        keypad.set_active_operator(Some(Operator::Multiply));
        assert_eq!(
            keypad.active_button().unwrap().event,
            Event::Operator(Operator::Multiply)
        );
        assert_eq!(keypad.buttons().filter(|b| b.active).count(), 1);

        keypad.set_active_operator(None);
        assert!(keypad.active_button().is_none());
    }

    // ===== Hit test =====

    #[test]
    fn test_hit_test_cells() {
        let keypad = Keypad::new();
        // 4 columns of 5, 5 rows of 2 inside a 1-cell border
        let area = Rect::new(10, 5, 22, 12);
        assert_eq!(keypad.hit_test(area, 11, 6), keypad.index_at(0, 0));
        assert_eq!(keypad.hit_test(area, 27, 6), keypad.index_at(0, 3));
        assert_eq!(keypad.hit_test(area, 17, 14), keypad.index_at(4, 1));
    }

    #[test]
    fn test_hit_test_border_and_outside() {
        let keypad = Keypad::new();
        let area = Rect::new(0, 0, 22, 12);
        assert_eq!(keypad.hit_test(area, 0, 5), None);
        assert_eq!(keypad.hit_test(area, 5, 0), None);
        assert_eq!(keypad.hit_test(area, 21, 5), None);
        assert_eq!(keypad.hit_test(area, 40, 40), None);
    }

    #[test]
    fn test_hit_test_too_small() {
        let keypad = Keypad::new();
        assert_eq!(keypad.hit_test(Rect::new(0, 0, 5, 5), 2, 2), None);
    }

    // ===== Widget tests =====

    fn render_to_string(keypad: &Keypad, theme: Theme) -> (Buffer, String) {
        let area = Rect::new(0, 0, 26, 12);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(keypad, theme).render(area, &mut buf);
        let content = buf.content().iter().map(|c| c.symbol()).collect();
        (buf, content)
    }

    #[test]
    fn test_widget_renders_labels() {
        let (_, content) = render_to_string(&Keypad::new(), Theme::Plain);
        assert!(content.contains("Keypad"));
        assert!(content.contains("[AC]"));
        assert!(content.contains("[7]"));
        assert!(content.contains("[=]"));
    }

    #[test]
    fn test_widget_highlights_active_operator() {
        let mut keypad = Keypad::new();
        keypad.set_active_operator(Some(Operator::Add));
        let (buf, _) = render_to_string(&keypad, Theme::Plain);
        assert!(buf.content().iter().any(|c| c.bg == Color::Yellow));
    }

    #[test]
    fn test_widget_flash_only_with_glow() {
        let mut keypad = Keypad::new();
        keypad.flash_event(Event::digit(5), 3);
        let (plain, _) = render_to_string(&keypad, Theme::Plain);
        assert!(!plain.content().iter().any(|c| c.bg == Color::Magenta));
        let (glow, _) = render_to_string(&keypad, Theme::Glow);
        assert!(glow.content().iter().any(|c| c.bg == Color::Magenta));
    }

    #[test]
    fn test_widget_tiny_area_draws_border_only() {
        let keypad = Keypad::new();
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(&keypad, Theme::Plain).render(area, &mut buf);
        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(!content.contains('7'));
    }
}
