//! Game clock
//!
//! Combines the [`State`] machine with the two players' remaining times.
//! Every transition produces a [`Transition`] carrying the status message to
//! publish; the caller decides what else (image capture, redraw) follows.

use chessclock_protocol::status::MOVED_NONE;
use chessclock_protocol::StatusMessage;

use crate::input::Button;
use crate::log::info;
use crate::state::{Event, Player, State};
use crate::time::elapsed_ms;

/// What kind of transition happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionKind {
    /// Timers restored and clock stopped
    Reset,
    /// First move from `Idle`
    Start,
    /// Turn passed to the opponent
    Switch,
    /// Running player's time reached zero
    Timeout,
}

/// A completed state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub kind: TransitionKind,
    pub from: State,
    pub to: State,
    /// Message for the companion app
    pub status: StatusMessage,
}

impl Transition {
    /// Whether a board image should be captured after this transition
    pub fn requests_image(&self) -> bool {
        matches!(self.kind, TransitionKind::Start | TransitionKind::Switch)
    }
}

/// Read-only view of the clock for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSnapshot {
    pub state: State,
    pub p1_remaining_ms: u32,
    pub p2_remaining_ms: u32,
}

/// Two-player countdown clock
#[derive(Debug, Clone)]
pub struct GameClock {
    state: State,
    /// Time each player starts with (ms)
    initial_ms: u32,
    p1_remaining_ms: u32,
    p2_remaining_ms: u32,
    /// Last time remaining time was charged (ms)
    last_tick_ms: u32,
}

impl GameClock {
    /// Create an idle clock with both players at `initial_ms`
    pub const fn new(initial_ms: u32, now_ms: u32) -> Self {
        Self {
            state: State::Idle,
            initial_ms,
            p1_remaining_ms: initial_ms,
            p2_remaining_ms: initial_ms,
            last_tick_ms: now_ms,
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Remaining time for `player` (ms)
    pub fn remaining_ms(&self, player: Player) -> u32 {
        match player {
            Player::One => self.p1_remaining_ms,
            Player::Two => self.p2_remaining_ms,
        }
    }

    /// Snapshot for display
    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            state: self.state,
            p1_remaining_ms: self.p1_remaining_ms,
            p2_remaining_ms: self.p2_remaining_ms,
        }
    }

    /// Return to `Idle` with both timers restored
    ///
    /// Always produces a transition, even from `Idle`.
    pub fn reset(&mut self, now_ms: u32) -> Transition {
        let from = self.state;
        self.state = State::Idle;
        self.p1_remaining_ms = self.initial_ms;
        self.p2_remaining_ms = self.initial_ms;
        self.last_tick_ms = now_ms;

        info!("game reset");
        self.transition(TransitionKind::Reset, from, MOVED_NONE)
    }

    /// Apply a debounced button press
    ///
    /// Time is charged to the running player up to `now_ms` before the press
    /// is evaluated. If that runs their clock out, the timeout is returned
    /// and the press has no further effect. Presses that do not apply in the
    /// current state return `None`.
    pub fn press(&mut self, button: Button, now_ms: u32) -> Option<Transition> {
        let event = Event::from_button(button);
        let Event::PlayerPressed(player) = event else {
            return Some(self.reset(now_ms));
        };

        if let Some(timeout) = self.tick(now_ms) {
            return Some(timeout);
        }

        let from = self.state;
        let to = from.transition(event);
        if to == from {
            return None;
        }

        let kind = if from == State::Idle {
            TransitionKind::Start
        } else {
            TransitionKind::Switch
        };
        self.state = to;
        self.last_tick_ms = now_ms;

        info!("player {} moved, {} -> {}", player.code(), from, to);
        Some(self.transition(kind, from, player.code()))
    }

    /// Charge the time elapsed since the last tick to the running player
    pub fn tick(&mut self, now_ms: u32) -> Option<Transition> {
        let elapsed = elapsed_ms(self.last_tick_ms, now_ms);
        self.last_tick_ms = now_ms;
        self.advance(elapsed)
    }

    /// Charge `elapsed` ms to the running player
    ///
    /// Remaining time never goes below zero; reaching zero ends the game.
    pub fn advance(&mut self, elapsed: u32) -> Option<Transition> {
        let player = self.state.active_player()?;
        let remaining = match player {
            Player::One => &mut self.p1_remaining_ms,
            Player::Two => &mut self.p2_remaining_ms,
        };

        if *remaining > elapsed {
            *remaining -= elapsed;
            return None;
        }

        *remaining = 0;
        let from = self.state;
        self.state = from.transition(Event::TimeExpired);

        info!("player {} out of time", player.code());
        Some(self.transition(TransitionKind::Timeout, from, player.code()))
    }

    fn transition(&self, kind: TransitionKind, from: State, moved_player: u8) -> Transition {
        Transition {
            kind,
            from,
            to: self.state,
            status: StatusMessage::from_millis(
                moved_player,
                self.p1_remaining_ms,
                self.p2_remaining_ms,
            ),
        }
    }
}
