//! Core calculator: number codec, operators, events, engine and session
//!
//! Nothing in here can fail at runtime except script parsing. Edge cases
//! such as division by zero or overflow degrade to defined display values.

pub mod engine;
pub mod event;
pub mod number;
mod operations;
pub mod session;

pub use engine::{Engine, Pending};
pub use event::{format_script, parse_script, Digit, Event, ScriptError};
pub use number::{format_display, parse_display};
pub use operations::{calculate, calculate_symbol, Operator};
pub use session::{Session, Step};
