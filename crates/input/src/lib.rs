//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and gathers
//! the presses seen between two ticks into one
//! [`InputFrame`](crate::types::InputFrame). Every action is a single trigger
//! per tick; holding a key does not auto-repeat beyond what the terminal
//! itself sends.

pub mod collector;
pub mod map;

pub use blockfall_types as types;

pub use collector::InputCollector;
pub use map::{handle_key_event, should_quit};
