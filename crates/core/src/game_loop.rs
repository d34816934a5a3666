//! Game loop - the single-threaded tick driver
//!
//! One tick:
//!
//! 1. wait up to the idle interval for the first input event, then drain the
//!    rest without blocking, folding movement into a [`Delta`];
//! 2. poll the gravity clock for `yforce`;
//! 3. resolve and apply the delta;
//! 4. on a lock, flash and remove completed rows, throw away stale input and
//!    spawn the next piece;
//! 5. emit render diffs and flush.
//!
//! Pause blocks in [`InputPort::wait_event`] and the row flash sleeps on the
//! [`Clock`]; nothing else suspends.

use std::io;
use std::time::Duration;

use log::{debug, info};

use crate::game_state::{GameState, Step};
use crate::gravity::GravityClock;
use crate::movement::Delta;
use crate::ports::{Clock, InputPort, RenderPort};
use crate::render_diff::RenderDiff;
use crate::row_clear::flash_pass;
use crate::types::{InputEvent, DEFAULT_FLASH_PAUSE_MS, DEFAULT_IDLE_POLL_MS, FLASH_PASSES};

/// Loop timing and display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Pause after each row-flash pass
    pub flash_pause: Duration,
    /// Longest wait for the first input event of a tick
    pub idle_poll: Duration,
    pub debug_overlay: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            flash_pause: Duration::from_millis(DEFAULT_FLASH_PAUSE_MS as u64),
            idle_poll: Duration::from_millis(DEFAULT_IDLE_POLL_MS as u64),
            debug_overlay: false,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    GameOver,
    Interrupted,
}

impl EndReason {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            EndReason::Quit => 0,
            EndReason::GameOver => 1,
            EndReason::Interrupted => 130,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEnd {
    pub reason: EndReason,
    pub rows_cleared: u32,
}

impl GameEnd {
    pub fn exit_code(&self) -> u8 {
        self.reason.exit_code()
    }
}

/// The game loop, generic over its three ports.
pub struct Game<I, R, C> {
    state: GameState,
    input: I,
    render: R,
    clock: C,
    gravity: GravityClock,
    diff: RenderDiff,
    settings: GameSettings,
}

impl<I, R, C> Game<I, R, C>
where
    I: InputPort,
    R: RenderPort,
    C: Clock,
{
    pub fn new(state: GameState, input: I, render: R, clock: C, settings: GameSettings) -> Self {
        let mut diff = RenderDiff::new();
        diff.set_debug_overlay(settings.debug_overlay);
        Self {
            state,
            input,
            render,
            clock,
            gravity: GravityClock::new(),
            diff,
            settings,
        }
    }

    /// Spawn the first piece if there is none and paint the whole screen.
    pub fn start(&mut self) -> io::Result<()> {
        if self.state.active().is_none() && !self.state.is_game_over() {
            self.state.spawn_next();
        }
        info!(
            "game started, preview {}, flash pause {:?}",
            self.state.preview().as_str(),
            self.settings.flash_pause
        );
        self.diff.request_full_redraw();
        self.emit()?;
        self.render.flush()
    }

    /// Throw the current game away and start a fresh one.
    pub fn restart(&mut self, seed: u32) -> io::Result<()> {
        self.state.new_game(seed);
        self.gravity.reset();
        self.diff.request_full_redraw();
        self.emit()?;
        self.render.flush()
    }

    /// Run ticks until the game ends.
    pub fn run(&mut self) -> io::Result<GameEnd> {
        self.start()?;
        loop {
            if let Some(end) = self.tick()? {
                return Ok(end);
            }
        }
    }

    /// Run a single tick. Returns `Some` once the game has ended.
    pub fn tick(&mut self) -> io::Result<Option<GameEnd>> {
        let mut delta = Delta::default();

        let mut event = self.input.poll_event(self.settings.idle_poll)?;
        while !event.is_none() {
            if let Some(reason) = self.handle_event(event, &mut delta)? {
                return Ok(Some(self.finish(reason)));
            }
            event = self.input.poll_event(Duration::ZERO)?;
        }

        delta.yforce = self.gravity.poll(&self.clock);

        if delta.is_zero() {
            if self.diff.needs_full_redraw() {
                self.emit()?;
                self.render.flush()?;
            }
            return Ok(None);
        }

        match self.state.advance(delta) {
            Step::Unchanged | Step::Moved => {}
            Step::Locked(rows) => {
                if !rows.is_empty() {
                    for pass in 0..FLASH_PASSES {
                        flash_pass(self.state.board_mut(), &rows, pass);
                        self.emit()?;
                        self.render.flush()?;
                        self.clock.sleep(self.settings.flash_pause);
                    }
                    self.state.clear_rows(&rows);
                }
                let stale = self.input.discard_pending()?;
                if stale > 0 {
                    debug!("discarded {} buffered event(s) after lock", stale);
                }
                self.state.spawn_next();
            }
            Step::GameOver => {
                self.emit()?;
                self.render.flush()?;
                return Ok(Some(self.finish(EndReason::GameOver)));
            }
        }

        self.emit()?;
        self.render.flush()?;
        Ok(None)
    }

    /// Apply one input event. Returns the end reason for Quit/Interrupt.
    fn handle_event(&mut self, event: InputEvent, delta: &mut Delta) -> io::Result<Option<EndReason>> {
        if delta.accumulate(event) {
            return Ok(None);
        }
        match event {
            InputEvent::Quit => return Ok(Some(EndReason::Quit)),
            InputEvent::Interrupt => return Ok(Some(EndReason::Interrupted)),
            InputEvent::Pause => {
                info!("paused");
                let resume = self.input.wait_event()?;
                info!("resumed by {}", resume.as_str());
                match resume {
                    InputEvent::Quit => return Ok(Some(EndReason::Quit)),
                    InputEvent::Interrupt => return Ok(Some(EndReason::Interrupted)),
                    _ => {}
                }
            }
            InputEvent::ToggleDebugOverlay => {
                let on = self.diff.toggle_debug_overlay();
                debug!("debug overlay {}", if on { "on" } else { "off" });
            }
            InputEvent::ForceFullRedraw => self.diff.request_full_redraw(),
            _ => {}
        }
        Ok(None)
    }

    fn emit(&mut self) -> io::Result<usize> {
        let score = self.state.score();
        let preview = self.state.preview();
        self.diff
            .emit(self.state.board_mut(), score, preview, &mut self.render)
    }

    fn finish(&self, reason: EndReason) -> GameEnd {
        let end = GameEnd {
            reason,
            rows_cleared: self.state.score(),
        };
        info!("game ended: {:?}, {} row(s) cleared", reason, end.rows_cleared);
        end
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn debug_overlay(&self) -> bool {
        self.diff.debug_overlay()
    }

    /// Hand the ports back, e.g. to restore the terminal.
    pub fn into_parts(self) -> (GameState, I, R, C) {
        (self.state, self.input, self.render, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::game_state::ActivePiece;
    use crate::sim::{ManualClock, ScriptedInput};
    use crate::types::{CellState, RenderCommand, Rotation, ShapeId};

    type TestGame = Game<ScriptedInput, Vec<RenderCommand>, ManualClock>;

    fn game(ticks: Vec<Vec<InputEvent>>) -> TestGame {
        Game::new(
            GameState::new(3),
            ScriptedInput::from_ticks(ticks),
            Vec::new(),
            ManualClock::new(1_000),
            GameSettings::default(),
        )
    }

    #[test]
    fn start_paints_full_frame() {
        let mut g = game(vec![]);
        g.start().unwrap();
        assert_eq!(g.render()[0], RenderCommand::ClearAndDrawFrame);
        assert!(g.state().active().is_some());
    }

    #[test]
    fn first_tick_applies_gravity() {
        let mut g = game(vec![vec![]]);
        g.start().unwrap();
        assert_eq!(g.tick().unwrap(), None);
        assert_eq!(g.state().active().unwrap().y, -2);

        // Same second: no further drop.
        g.tick().unwrap();
        assert_eq!(g.state().active().unwrap().y, -2);
    }

    #[test]
    fn quit_ends_immediately_and_ignores_later_events() {
        let mut g = game(vec![vec![InputEvent::Quit, InputEvent::MoveLeft]]);
        g.start().unwrap();
        let x = g.state().active().unwrap().x;
        let end = g.tick().unwrap().unwrap();
        assert_eq!(end.reason, EndReason::Quit);
        assert_eq!(end.exit_code(), 0);
        assert_eq!(g.state().active().unwrap().x, x);
    }

    #[test]
    fn pause_consumes_resume_event() {
        let mut g = game(vec![vec![InputEvent::Pause], vec![InputEvent::MoveLeft]]);
        g.start().unwrap();
        let x = g.state().active().unwrap().x;
        assert_eq!(g.tick().unwrap(), None);
        assert_eq!(g.state().active().unwrap().x, x);
    }

    #[test]
    fn interrupt_while_paused_ends_game() {
        let mut g = game(vec![vec![InputEvent::Pause], vec![InputEvent::Interrupt]]);
        g.start().unwrap();
        let end = g.tick().unwrap().unwrap();
        assert_eq!(end.reason, EndReason::Interrupted);
        assert_eq!(end.exit_code(), 130);
    }

    #[test]
    fn completed_row_flashes_then_clears() {
        let mut g = game(vec![vec![]]);
        *g.state_mut().board_mut() = Board::from_rows(&["####..####"]);
        g.state_mut().set_active(ActivePiece {
            shape: ShapeId::new(0).unwrap(),
            rotation: Rotation::North,
            x: 3,
            y: 17,
        });
        g.start().unwrap();

        assert_eq!(g.tick().unwrap(), None);
        assert_eq!(g.state().score(), 1);
        assert_eq!(g.clock().slept().len(), FLASH_PASSES as usize);
        // The upper half of the O survives, shifted onto the floor.
        assert_eq!(g.state().board().get(4, 19), Some(CellState::Petrified));
        assert_eq!(g.state().board().get(0, 19), Some(CellState::Empty));
        assert_eq!(g.state().active().unwrap().y, -3);
        assert!(g.render().contains(&RenderCommand::SetScore(1)));
    }
}
