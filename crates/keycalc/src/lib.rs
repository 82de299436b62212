//! keycalc - four-function keypad calculator
//!
//! The calculator is a small state machine driven by keypad events. The
//! display is string backed and every operation goes through `f64`, so
//! results match what a pocket calculator built on floating point shows,
//! rounding quirks included.
//!
//! - Operators chain left to right with no precedence (`2 + 3 × 4 = 20`)
//! - Division by zero shows `0`
//! - The engine never fails; every reachable state has a defined display
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut session = Session::new();
//! session.run_script("5+3*").unwrap();
//! assert_eq!(session.display(), "8");
//!
//! let engine = Engine::new()
//!     .reduce(Event::digit(7))
//!     .reduce(Event::Operator(Operator::Divide))
//!     .reduce(Event::digit(0))
//!     .reduce(Event::Equals);
//! assert_eq!(engine.display(), "0");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalcConfig, ConfigError, Theme};
    pub use crate::core::{
        calculate, format_display, parse_display, parse_script, Digit, Engine, Event, Operator,
        Pending, ScriptError, Session, Step,
    };
    pub use crate::driver::CalculatorDriver;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
