//! Terminal session guard: raw mode plus alternate screen for the game's lifetime.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};
use log::{debug, warn};

use crate::game_view::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Puts the terminal into game mode and restores it exactly once, on
/// [`restore`](TerminalSession::restore) or on drop (including unwinding).
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        if let Ok((w, h)) = terminal::size() {
            if w < WINDOW_WIDTH || h < WINDOW_HEIGHT {
                warn!(
                    "terminal is {}x{}, game window needs {}x{}",
                    w, h, WINDOW_WIDTH, WINDOW_HEIGHT
                );
            }
        }

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        // From here on a failure must still undo raw mode.
        let session = Self { active: true };

        let mut buf = Vec::new();
        buf.queue(terminal::EnterAlternateScreen)?;
        buf.queue(cursor::Hide)?;
        buf.queue(terminal::DisableLineWrap)?;
        write_all(&buf).context("failed to enter alternate screen")?;

        debug!("terminal session entered");
        Ok(session)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Leave the alternate screen and disable raw mode. Safe to call twice.
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut buf = Vec::new();
        buf.queue(ResetColor)?;
        buf.queue(SetAttribute(Attribute::Reset))?;
        buf.queue(terminal::EnableLineWrap)?;
        buf.queue(cursor::Show)?;
        buf.queue(terminal::LeaveAlternateScreen)?;
        let screen = write_all(&buf).context("failed to leave alternate screen");

        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        debug!("terminal session restored");
        screen
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("terminal restore on drop failed: {err:#}");
        }
    }
}

fn write_all(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(bytes)?;
    stdout.flush()
}
