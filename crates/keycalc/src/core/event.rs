//! Keypad events and the compact event script
//!
//! A script is the sequence of keys a user would press, e.g. `"5+3*="` or
//! `"12.5 +/- % AC"`. Whitespace is skipped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::operations::Operator;

/// A single decimal digit (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Creates a digit, returning `None` for values above 9
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a digit from an ASCII character
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the ASCII character for this digit
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<u8> for Digit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("digit out of range: {value}"))
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> Self {
        d.0
    }
}

/// Discrete UI events consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Event {
    /// Digit key (0-9)
    Digit(Digit),
    /// Decimal point key
    Decimal,
    /// Operator key
    Operator(Operator),
    /// Equals key
    Equals,
    /// All-clear key
    Clear,
    /// Sign toggle key (+/-)
    ToggleSign,
    /// Percent key
    Percent,
}

impl Event {
    /// Shorthand for a digit event from a literal `0..=9`.
    ///
    /// Use [`Digit::new`] for values that are not known to be in range.
    /// Debug builds panic on anything above 9; release builds clamp it.
    #[must_use]
    pub fn digit(value: u8) -> Self {
        debug_assert!(value <= 9, "digit out of range: {value}");
        Self::Digit(Digit(value.min(9)))
    }

    /// Maps a typed character to an event
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = Digit::from_char(c) {
            return Some(Self::Digit(d));
        }
        if let Some(op) = Operator::from_symbol(c) {
            return Some(Self::Operator(op));
        }
        match c {
            '.' | ',' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            'n' | 'N' | '±' => Some(Self::ToggleSign),
            '%' => Some(Self::Percent),
            _ => None,
        }
    }

    /// Returns the label printed on the keypad button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.as_char().to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.glyph().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::ToggleSign => "+/-".to_string(),
            Self::Percent => "%".to_string(),
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Errors raised while reading an event script
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// A character that maps to no key
    #[error("unknown key '{token}' at position {position}")]
    UnknownToken {
        /// The offending character
        token: char,
        /// Character offset in the script
        position: usize,
    },
}

/// Parses an event script into events.
///
/// Recognises the multi-character labels `AC` and `+/-` before falling back
/// to single-character keys.
pub fn parse_script(script: &str) -> Result<Vec<Event>, ScriptError> {
    let chars: Vec<char> = script.chars().collect();
    let mut events = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if chars[i..].starts_with(&['A', 'C']) {
            events.push(Event::Clear);
            i += 2;
            continue;
        }
        if chars[i..].starts_with(&['+', '/', '-']) {
            events.push(Event::ToggleSign);
            i += 3;
            continue;
        }
        match Event::from_char(c) {
            Some(event) => events.push(event),
            None => {
                return Err(ScriptError::UnknownToken {
                    token: c,
                    position: i,
                })
            }
        }
        i += 1;
    }

    Ok(events)
}

/// Renders events back into a script, one key per token
#[must_use]
pub fn format_script(events: &[Event]) -> String {
    events
        .iter()
        .map(|event| match event {
            Event::Operator(op) => op.symbol().to_string(),
            other => other.label(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
