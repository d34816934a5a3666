//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: render commands from the core
//! paint a fixed game window into a framebuffer, and the renderer flushes only
//! the changed runs to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: window layout (playfield, preview, row count, debug grid)
//! - [`renderer`]: [`TerminalRenderer`], the render port
//! - [`session`]: raw mode / alternate screen guard

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod session;

pub use termtris_core as core;
pub use termtris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, WINDOW_HEIGHT, WINDOW_WIDTH};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use session::TerminalSession;
