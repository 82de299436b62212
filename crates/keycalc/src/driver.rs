//! Unified calculator driver
//!
//! Write the behavioural checks once and run them against every front end.
//! A driver only needs to accept key presses and report the display.

use crate::core::{parse_script, Event, Operator, Session};

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use keycalc::core::Session;
/// use keycalc::driver::{verify_eager_chaining, CalculatorDriver};
///
/// let mut session = Session::new();
/// verify_eager_chaining(&mut session);
/// assert_eq!(session.display_text(), "8");
/// ```
pub trait CalculatorDriver {
    /// Presses a single key
    fn press(&mut self, event: Event);

    /// Gets the current display
    fn display_text(&self) -> String;

    /// Gets the operator awaiting its second operand
    fn pending_operator(&self) -> Option<Operator>;

    /// Presses the all-clear key
    fn clear(&mut self) {
        self.press(Event::Clear);
    }

    /// Presses every key of a script. Panics on an invalid script, so only
    /// use it with literals.
    fn press_all(&mut self, script: &str) {
        let events = parse_script(script)
            .unwrap_or_else(|e| panic!("invalid driver script {script:?}: {e}"));
        for event in events {
            self.press(event);
        }
    }
}

impl CalculatorDriver for Session {
    fn press(&mut self, event: Event) {
        Session::press(self, event);
    }

    fn display_text(&self) -> String {
        self.display().to_string()
    }

    fn pending_operator(&self) -> Option<Operator> {
        Session::pending_operator(self)
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalculatorDriver, Event, Operator};
    use crate::tui::{CalculatorApp, KeyAction};

    /// TUI-specific driver wrapping the calculator app
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, event: Event) {
            self.app.handle_action(KeyAction::Press(event));
        }

        fn display_text(&self) -> String {
            self.app.display().to_string()
        }

        fn pending_operator(&self) -> Option<Operator> {
            self.app.engine().pending_operator()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified behavioural checks =====
// These work with ANY CalculatorDriver implementation

/// Digits concatenate from clear, leading zero suppressed
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("123");
    assert_eq!(driver.display_text(), "123");

    driver.clear();
    driver.press_all("0042");
    assert_eq!(driver.display_text(), "42");
}

/// A second decimal point is ignored
pub fn verify_decimal_idempotent<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press(Event::Decimal);
    assert_eq!(driver.display_text(), "0.");
    driver.press(Event::Decimal);
    assert_eq!(driver.display_text(), "0.");
}

/// Operators resolve the previous operator immediately
pub fn verify_eager_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("5+3*");
    assert_eq!(driver.display_text(), "8");
    assert_eq!(driver.pending_operator(), Some(Operator::Multiply));
}

/// Equals without a pending operator changes nothing
pub fn verify_equals_without_operator<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("7=");
    assert_eq!(driver.display_text(), "7");
    assert_eq!(driver.pending_operator(), None);
}

/// Dividing by zero shows 0
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("5/0=");
    assert_eq!(driver.display_text(), "0");
}

/// Clear resets even in the middle of an operation
pub fn verify_clear_mid_operation<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("12+34");
    driver.clear();
    assert_eq!(driver.display_text(), "0");
    assert_eq!(driver.pending_operator(), None);

    // The old pending operation must not leak into the next one
    driver.press_all("2=");
    assert_eq!(driver.display_text(), "2");
}

/// Toggling the sign twice restores the value
pub fn verify_toggle_sign_involution<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all("12.5");
    driver.press(Event::ToggleSign);
    assert_eq!(driver.display_text(), "-12.5");
    driver.press(Event::ToggleSign);
    assert_eq!(driver.display_text(), "12.5");
}

/// Runs every check against one driver
pub fn verify_all<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_decimal_idempotent(driver);
    verify_eager_chaining(driver);
    verify_equals_without_operator(driver);
    verify_divide_by_zero(driver);
    verify_clear_mid_operation(driver);
    verify_toggle_sign_involution(driver);
}
