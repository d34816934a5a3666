//! Ports - the seams between the game loop and the outside world
//!
//! The loop talks to the keyboard, the screen and the wall clock only through
//! these traits. The terminal crates implement them for real devices; the
//! [`sim`](crate::sim) module implements them for tests.

use std::io;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{InputEvent, RenderCommand};

/// Source of discrete input events.
pub trait InputPort {
    /// Wait up to `timeout` for one event; `InputEvent::None` when nothing
    /// arrived. A zero timeout never blocks.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<InputEvent>;

    /// Block until an event arrives (used while paused).
    fn wait_event(&mut self) -> io::Result<InputEvent>;

    /// Throw away everything buffered.
    fn discard_pending(&mut self) -> io::Result<usize> {
        let mut dropped = 0;
        while !self.poll_event(Duration::ZERO)?.is_none() {
            dropped += 1;
        }
        Ok(dropped)
    }
}

/// Sink for cell-level draw commands.
pub trait RenderPort {
    fn apply(&mut self, cmd: RenderCommand) -> io::Result<()>;

    /// Push buffered output to the device.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Recording render port.
impl RenderPort for Vec<RenderCommand> {
    fn apply(&mut self, cmd: RenderCommand) -> io::Result<()> {
        self.push(cmd);
        Ok(())
    }
}

impl<R: RenderPort + ?Sized> RenderPort for &mut R {
    fn apply(&mut self, cmd: RenderCommand) -> io::Result<()> {
        (**self).apply(cmd)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Wall clock and sleeping.
pub trait Clock {
    /// Whole seconds since the Unix epoch.
    fn unix_seconds(&self) -> u64;

    fn sleep(&mut self, duration: Duration);
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        // A clock set before 1970 just reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
