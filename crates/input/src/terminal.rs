//! `InputPort` over crossterm's event queue.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use log::trace;

use crate::core::InputPort;
use crate::map::map_key;
use crate::signals::InterruptFlag;
use crate::types::InputEvent;

/// How often a blocking wait re-checks the interrupt flag.
const WAIT_SLICE: Duration = Duration::from_millis(100);

/// Reads key events from the controlling terminal.
///
/// Expects raw mode to be on; the terminal session handles that. Once the
/// interrupt flag is raised every call reports `Interrupt`.
#[derive(Debug, Default)]
pub struct TerminalInput {
    interrupt: InterruptFlag,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `Interrupt` once `flag` is raised.
    pub fn with_interrupt_flag(flag: InterruptFlag) -> Self {
        Self { interrupt: flag }
    }
}

/// Translate one terminal event. A resize repaints the whole window.
pub fn translate(ev: Event) -> Option<InputEvent> {
    match ev {
        Event::Key(key) => map_key(key),
        Event::Resize(..) => Some(InputEvent::ForceFullRedraw),
        _ => None,
    }
}

impl InputPort for TerminalInput {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<InputEvent> {
        if self.interrupt.is_raised() {
            return Ok(InputEvent::Interrupt);
        }
        let mut wait = timeout;
        // Unbound keys are skipped without waiting again.
        while event::poll(wait)? {
            let ev = event::read()?;
            trace!("terminal event {:?}", ev);
            if let Some(mapped) = translate(ev) {
                return Ok(mapped);
            }
            wait = Duration::ZERO;
        }
        if self.interrupt.is_raised() {
            return Ok(InputEvent::Interrupt);
        }
        Ok(InputEvent::None)
    }

    fn wait_event(&mut self) -> io::Result<InputEvent> {
        loop {
            if self.interrupt.is_raised() {
                return Ok(InputEvent::Interrupt);
            }
            if !event::poll(WAIT_SLICE)? {
                continue;
            }
            if let Some(mapped) = translate(event::read()?) {
                return Ok(mapped);
            }
        }
    }
}
