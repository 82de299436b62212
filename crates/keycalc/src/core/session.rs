//! Session transcript
//!
//! A session owns an engine and records the display after every event, so a
//! scripted run can be printed step by step or exported as JSON. The
//! transcript is a bounded queue; the oldest steps are dropped first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::engine::Engine;
use super::event::{parse_script, Event, ScriptError};
use super::operations::Operator;

/// One recorded event and the display it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// The event that was applied
    pub event: Event,
    /// Display after the event
    pub display: String,
}

impl Step {
    /// Returns a formatted display string
    #[must_use]
    pub fn display_line(&self) -> String {
        format!("{:>4}  {}", self.event.label(), self.display)
    }
}

/// Engine plus a bounded transcript of the events fed to it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SessionRecord")]
pub struct Session {
    engine: Engine,
    steps: VecDeque<Step>,
    capacity: usize,
}

/// Serialized form of a session, trimmed to its capacity on load
#[derive(Debug, Deserialize)]
struct SessionRecord {
    engine: Engine,
    steps: VecDeque<Step>,
    capacity: usize,
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        let SessionRecord {
            engine,
            mut steps,
            capacity,
        } = record;
        let excess = steps.len().saturating_sub(capacity);
        steps.drain(..excess);
        Self {
            engine,
            steps,
            capacity,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Default maximum transcript length
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Creates an empty session with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty session keeping at most `capacity` steps
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            engine: Engine::new(),
            steps: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Applies an event and records the resulting display
    pub fn press(&mut self, event: Event) -> &str {
        self.engine.apply(event);
        if self.capacity > 0 {
            if self.steps.len() >= self.capacity {
                self.steps.pop_front();
            }
            self.steps.push_back(Step {
                event,
                display: self.engine.display().to_string(),
            });
        }
        self.engine.display()
    }

    /// Applies every event in order, returning the final display
    pub fn run<I>(&mut self, events: I) -> &str
    where
        I: IntoIterator<Item = Event>,
    {
        let mut count = 0usize;
        for event in events {
            self.press(event);
            count += 1;
        }
        tracing::debug!(events = count, display = %self.engine.display(), "replayed events");
        self.engine.display()
    }

    /// Parses a script and runs it
    pub fn run_script(&mut self, script: &str) -> Result<&str, ScriptError> {
        let events = parse_script(script)?;
        Ok(self.run(events))
    }

    /// Returns the current display
    #[must_use]
    pub fn display(&self) -> &str {
        self.engine.display()
    }

    /// Returns the pending operator, if any
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.engine.pending_operator()
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the transcript (oldest first)
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Returns the number of recorded steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the maximum transcript length
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the most recent step
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.back()
    }

    /// Resets the engine and forgets the transcript
    pub fn reset(&mut self) {
        self.engine.clear();
        self.steps.clear();
    }

    /// Serializes the session to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a session from JSON, dropping the oldest steps beyond
    /// its capacity
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Exports the transcript as one line per step
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.steps
            .iter()
            .map(Step::display_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Step tests =====

    #[test]
    fn test_step_display_line() {
        let step = Step {
            event: Event::Clear,
            display: "0".into(),
        };
        assert_eq!(step.display_line(), "  AC  0");
    }

    // ===== Session tests =====

    #[test]
    fn test_session_new() {
        let session = Session::new();
        assert_eq!(session.display(), "0");
        assert!(session.is_empty());
        assert_eq!(session.capacity(), Session::DEFAULT_CAPACITY);
    }

    #[test]
    fn test_press_records_step() {
        let mut session = Session::new();
        assert_eq!(session.press(Event::digit(4)), "4");
        assert_eq!(session.len(), 1);
        assert_eq!(session.last().unwrap().display, "4");
    }

    #[test]
    fn test_run_script() {
        let mut session = Session::new();
        assert_eq!(session.run_script("5+3*").unwrap(), "8");
        let displays: Vec<_> = session.steps().map(|s| s.display.as_str()).collect();
        assert_eq!(displays, vec!["5", "5", "3", "8"]);
        assert_eq!(session.pending_operator(), Some(Operator::Multiply));
    }

    #[test]
    fn test_run_script_error_leaves_session_untouched() {
        let mut session = Session::new();
        assert!(session.run_script("1+?").is_err());
        assert!(session.is_empty());
        assert_eq!(session.display(), "0");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut session = Session::with_capacity(3);
        session.run_script("12345").unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.steps().next().unwrap().display, "123");
        assert_eq!(session.display(), "12345");
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut session = Session::with_capacity(0);
        session.run_script("9*9=").unwrap();
        assert!(session.is_empty());
        assert_eq!(session.display(), "81");
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new();
        session.run_script("7+").unwrap();
        session.reset();
        assert!(session.is_empty());
        assert_eq!(session.display(), "0");
        assert!(session.pending_operator().is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut session = Session::new();
        session.run_script("1.5*2=").unwrap();
        let json = session.to_json().unwrap();
        assert!(json.contains("\"display\": \"3\""));
        let restored = Session::from_json(&json).unwrap();
        assert_eq!(restored.display(), "3");
        assert_eq!(restored.len(), session.len());
    }

    #[test]
    fn test_from_json_enforces_capacity() {
        let mut session = Session::with_capacity(10);
        session.run_script("12345").unwrap();
        let json = session
            .to_json()
            .unwrap()
            .replace("\"capacity\": 10", "\"capacity\": 2");

        let mut restored = Session::from_json(&json).unwrap();
        assert_eq!(restored.capacity(), 2);
        assert_eq!(restored.len(), 2);
        let displays: Vec<_> = restored.steps().map(|s| s.display.as_str()).collect();
        assert_eq!(displays, vec!["1234", "12345"]);

        restored.press(Event::digit(6));
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.display(), "123456");
    }

    #[test]
    fn test_from_json_zero_capacity_drops_all_steps() {
        let mut session = Session::new();
        session.run_script("7*").unwrap();
        let json = session
            .to_json()
            .unwrap()
            .replace("\"capacity\": 1000", "\"capacity\": 0");
        let restored = Session::from_json(&json).unwrap();
        assert!(restored.is_empty());
        assert_eq!(restored.display(), "7");
    }

    #[test]
    fn test_export_formatted() {
        let mut session = Session::new();
        session.run_script("2+2=").unwrap();
        let text = session.export_formatted();
        assert_eq!(text.lines().count(), 4);
        assert!(text.ends_with("   =  4"));
    }
}
