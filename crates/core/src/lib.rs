//! Core game logic - the board/piece state machine and its tick driver
//!
//! Everything here is deterministic and device-free. The keyboard, the screen
//! and the wall clock are reached only through the [`ports`] traits, so the
//! whole game can be driven from a script in tests.
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven 4x4 piece masks in four rotations
//! - [`board`]: 10x20 cell grid plus the render shadow
//! - [`rng`] / [`spawner`]: seeded shape selection and the preview slot
//! - [`collision`]: clear / edge / bottom classification of a pose
//! - [`movement`]: per-tick delta and the undo-until-valid resolver
//! - [`row_clear`]: completed-row detection, flash and compaction
//! - [`gravity`]: one forced row per wall-clock second
//! - [`render_diff`]: board changes to minimal draw commands
//! - [`game_state`]: board, active piece, spawner and score in one value
//! - [`game_loop`]: the tick driver over [`ports`]
//! - [`sim`]: scripted input and a manual clock
//!
//! # Rules
//!
//! | rule | behaviour |
//! |------|-----------|
//! | spawn | preview shape at (3, -3), rotation 0 |
//! | collision | bottom/petrified beats edge beats clear |
//! | resolve | undo rotation, then x, then y, one unit at a time |
//! | lock | pose still bottom-blocked with no button input left |
//! | game over | lock with anchor y < 1 |
//! | score | +1 per cleared row |
//!
//! # Example
//!
//! ```
//! use termtris_core::sim::{ManualClock, ScriptedInput};
//! use termtris_core::types::{InputEvent, RenderCommand};
//! use termtris_core::{EndReason, Game, GameSettings, GameState};
//!
//! let input = ScriptedInput::from_ticks([
//!     vec![InputEvent::MoveLeft],
//!     vec![InputEvent::Quit],
//! ]);
//! let mut game = Game::new(
//!     GameState::new(12345),
//!     input,
//!     Vec::<RenderCommand>::new(),
//!     ManualClock::new(0),
//!     GameSettings::default(),
//! );
//!
//! let end = game.run().unwrap();
//! assert_eq!(end.reason, EndReason::Quit);
//! assert_eq!(end.rows_cleared, 0);
//! ```

pub mod board;
pub mod collision;
pub mod game_loop;
pub mod game_state;
pub mod gravity;
pub mod movement;
pub mod ports;
pub mod render_diff;
pub mod rng;
pub mod row_clear;
pub mod shapes;
pub mod sim;
pub mod spawner;

pub use termtris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{classify, Collision};
pub use game_loop::{EndReason, Game, GameEnd, GameSettings};
pub use game_state::{ActivePiece, GameState, Step};
pub use gravity::GravityClock;
pub use movement::{resolve, Delta, Resolution};
pub use ports::{Clock, InputPort, RenderPort, SystemClock};
pub use render_diff::RenderDiff;
pub use rng::SimpleRng;
pub use row_clear::{complete_rows, flash_pass, remove_rows, CompletedRows};
pub use shapes::{get_shape, mask};
pub use spawner::Spawner;
