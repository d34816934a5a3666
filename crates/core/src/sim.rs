//! Deterministic port implementations for tests, benches and replays
//!
//! `ScriptedInput` feeds a fixed event script tick by tick; `ManualClock`
//! only moves when told to and records every requested sleep.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::ports::{Clock, InputPort};
use crate::types::InputEvent;

/// Input port backed by a script.
///
/// The script is a list of ticks; each tick's events are returned by
/// successive polls, then one `InputEvent::None` ends the tick's drain.
/// Once the script runs out every poll returns `None` and `wait_event`
/// returns `Quit`, so a paused game cannot hang a test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Option<InputEvent>>,
    discarded: usize,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from per-tick event lists.
    pub fn from_ticks<T>(ticks: T) -> Self
    where
        T: IntoIterator,
        T::Item: IntoIterator<Item = InputEvent>,
    {
        let mut input = Self::new();
        for tick in ticks {
            input.push_tick(tick);
        }
        input
    }

    /// Append one tick's worth of events.
    pub fn push_tick(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.queue.extend(events.into_iter().map(Some));
        self.queue.push_back(None);
    }

    /// Append `n` ticks with no input.
    pub fn push_idle(&mut self, n: usize) {
        self.queue.extend(std::iter::repeat(None).take(n));
    }

    /// Script entries not consumed yet (events and tick boundaries).
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Events thrown away by `discard_pending`.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

impl InputPort for ScriptedInput {
    fn poll_event(&mut self, _timeout: Duration) -> io::Result<InputEvent> {
        Ok(self.queue.pop_front().flatten().unwrap_or(InputEvent::None))
    }

    fn wait_event(&mut self) -> io::Result<InputEvent> {
        while let Some(entry) = self.queue.pop_front() {
            if let Some(event) = entry {
                return Ok(event);
            }
        }
        Ok(InputEvent::Quit)
    }

    /// Drop the rest of the current tick, keeping later ticks.
    fn discard_pending(&mut self) -> io::Result<usize> {
        let mut dropped = 0;
        while let Some(Some(_)) = self.queue.front() {
            self.queue.pop_front();
            dropped += 1;
        }
        self.discarded += dropped;
        Ok(dropped)
    }
}

/// Clock that stands still until advanced.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: u64,
    slept: Vec<Duration>,
}

impl ManualClock {
    pub fn new(seconds: u64) -> Self {
        Self {
            seconds,
            slept: Vec::new(),
        }
    }

    pub fn advance_seconds(&mut self, n: u64) {
        self.seconds += n;
    }

    /// Every duration passed to `sleep`, in order.
    pub fn slept(&self) -> &[Duration] {
        &self.slept
    }
}

impl Clock for ManualClock {
    fn unix_seconds(&self) -> u64 {
        self.seconds
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept.push(duration);
    }
}
