//! Calculator engine: a state machine over keypad events
//!
//! State is three fields: the display string, an optional pending operation
//! and the waiting-for-second-operand flag. Operators chain left to right as
//! a running accumulator; there is no precedence.

use serde::{Deserialize, Serialize};

use super::event::{Digit, Event};
use super::number::{format_display, parse_display};
use super::operations::{calculate, Operator};

/// An operator chosen but not yet resolved against a second operand.
///
/// Holding both halves in one value keeps "operand and operator are both
/// present or both absent" structural.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pending {
    /// Left-hand operand (running accumulator)
    pub operand: f64,
    /// Operator to apply once the second operand is known
    pub operator: Operator,
}

/// Calculator engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    display: String,
    pending: Option<Pending>,
    waiting_for_operand: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Display value at session start and after clear
    pub const INITIAL_DISPLAY: &'static str = "0";

    /// Creates an engine in its initial state
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: Self::INITIAL_DISPLAY.to_string(),
            pending: None,
            waiting_for_operand: false,
        }
    }

    /// Returns the current display string
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns the display parsed as a number
    #[must_use]
    pub fn value(&self) -> f64 {
        parse_display(&self.display)
    }

    /// Returns the pending operation, if any
    #[must_use]
    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Returns the pending operator, if any
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.map(|p| p.operator)
    }

    /// Returns true when the next digit starts a fresh number
    #[must_use]
    pub fn is_waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    /// Returns the state after `event` without touching `self`
    #[must_use]
    pub fn reduce(&self, event: Event) -> Self {
        let mut next = self.clone();
        next.apply(event);
        next
    }

    /// Applies a single event in place
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Digit(d) => self.input_digit(d),
            Event::Decimal => self.input_decimal(),
            Event::Operator(op) => self.perform_operation(op),
            Event::Equals => self.equals(),
            Event::Clear => self.clear(),
            Event::ToggleSign => self.toggle_sign(),
            Event::Percent => self.percent(),
        }
        tracing::trace!(
            %event,
            display = %self.display,
            pending = ?self.pending,
            waiting = self.waiting_for_operand,
            "applied event"
        );
    }

    /// Appends a digit, or starts a fresh number after an operator
    pub fn input_digit(&mut self, digit: Digit) {
        let c = digit.as_char();
        if self.waiting_for_operand {
            self.display = c.to_string();
            self.waiting_for_operand = false;
        } else if self.display == Self::INITIAL_DISPLAY {
            self.display = c.to_string();
        } else {
            self.display.push(c);
        }
    }

    /// Appends a decimal point unless one is already present
    pub fn input_decimal(&mut self) {
        if self.waiting_for_operand {
            self.display = "0.".to_string();
            self.waiting_for_operand = false;
            return;
        }
        if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Negates the displayed value
    pub fn toggle_sign(&mut self) {
        self.display = format_display(self.value() * -1.0);
    }

    /// Divides the displayed value by 100
    pub fn percent(&mut self) {
        self.display = format_display(self.value() / 100.0);
    }

    /// Selects an operator, first resolving any operator already pending
    pub fn perform_operation(&mut self, op: Operator) {
        let input = self.value();

        let operand = match self.pending {
            None => input,
            Some(Pending { operand, operator }) => {
                let result = calculate(operand, input, operator);
                tracing::debug!(operand, %operator, input, result, "chained evaluation");
                self.display = format_display(result);
                result
            }
        };

        self.pending = Some(Pending {
            operand,
            operator: op,
        });
        self.waiting_for_operand = true;
    }

    /// Resolves the pending operation; no-op when nothing is pending
    pub fn equals(&mut self) {
        let Some(Pending { operand, operator }) = self.pending.take() else {
            return;
        };

        let result = calculate(operand, self.value(), operator);
        self.display = format_display(result);
        self.waiting_for_operand = false;
    }

    /// Resets all state to initial values
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
