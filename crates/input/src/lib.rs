//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::InputEvent`] and provides
//! [`TerminalInput`], the keyboard-backed input port for the game loop.
//! Termination signals reach the loop through [`InterruptFlag`].

pub mod map;
pub mod signals;
pub mod terminal;

pub use termtris_core as core;
pub use termtris_types as types;

pub use map::{is_interrupt, map_key};
pub use signals::InterruptFlag;
pub use terminal::{translate, TerminalInput};
