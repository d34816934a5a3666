//! termtris (workspace facade crate).
//!
//! Re-exports the member crates under `termtris::{core,input,term,types}` and
//! owns the binary's configuration loader.

pub mod config;

pub use termtris_core as core;
pub use termtris_input as input;
pub use termtris_term as term;
pub use termtris_types as types;
