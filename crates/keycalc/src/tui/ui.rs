//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::config::Theme;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Splits the terminal into the calculator column and the help sidebar
fn horizontal_layout(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Min(26), Constraint::Length(24)])
        .split(area);
    [chunks[0], chunks[1]]
}

/// Splits the calculator column into display, pending line and keypad
fn column_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(7),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Returns where the keypad is drawn inside a terminal of size `area`
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    let [main, _] = horizontal_layout(area);
    column_layout(main)[2]
}

/// Fits the display text into `width` cells, keeping the least significant
/// end and marking the cut with an ellipsis
#[must_use]
pub fn fit_display(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let tail: String = text.chars().skip(len - (width - 1)).collect();
    format!("…{tail}")
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn accent(&self) -> Color {
        match self.app.theme() {
            Theme::Plain => Color::Cyan,
            Theme::Glow => Color::Magenta,
        }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(2) as usize;
        let text = fit_display(self.app.display(), width);

        let paragraph = Paragraph::new(Span::styled(
            text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .title(" Display ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.accent())),
        );

        paragraph.render(area, buf);
    }

    fn render_pending(&self, area: Rect, buf: &mut Buffer) {
        let Some(label) = self.app.pending_label() else {
            return;
        };
        let width = area.width as usize;
        Paragraph::new(Span::styled(
            fit_display(&label, width),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Right)
        .render(area, buf);
    }

    fn render_help_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let [main, help] = horizontal_layout(area);
        let [display, pending, keypad] = column_layout(main);

        self.render_display(display, buf);
        self.render_pending(pending, buf);
        KeypadWidget::new(self.app.keypad(), self.app.theme()).render(keypad, buf);
        self.render_help_sidebar(help, buf);
    }
}

/// Window title
pub const TITLE: &str = " keycalc ";

/// Keyboard shortcuts shown in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+-*/", "Operators"),
    ("Enter", "Equals"),
    ("n", "Toggle sign"),
    ("%", "Percent"),
    ("Esc", "Clear"),
    ("q", "Quit"),
];
