//! State machine definition
//!
//! ```text
//!   Idle ──P1 btn──▶ RunningP2 ──P2 btn──▶ RunningP1 ──P1 btn──▶ RunningP2
//!   Idle ──P2 btn──▶ RunningP1
//!   RunningP1 ──expired──▶ Over(One)
//!   RunningP2 ──expired──▶ Over(Two)
//! ```
//!
//! Reset returns to `Idle` from every state.

use super::events::Event;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The opponent
    pub const fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Player number as reported to the companion app (1 or 2)
    pub const fn code(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Clock states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Both clocks stopped at the initial time
    Idle,
    /// Player 1's clock counting down
    RunningP1,
    /// Player 2's clock counting down
    RunningP2,
    /// The given player ran out of time
    Over(Player),
}

impl State {
    /// Running state for `player`
    pub const fn running(player: Player) -> Self {
        match player {
            Player::One => State::RunningP1,
            Player::Two => State::RunningP2,
        }
    }

    /// Player whose clock is counting down, if any
    pub fn active_player(&self) -> Option<Player> {
        match self {
            State::RunningP1 => Some(Player::One),
            State::RunningP2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Check if a clock is counting down
    pub fn is_running(&self) -> bool {
        self.active_player().is_some()
    }

    /// Process an event and return the next state
    ///
    /// Pressing your own button ends your turn. In `Idle` the first press
    /// starts the opponent's clock. Presses that do not apply leave the state
    /// unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (_, ResetPressed) => Idle,

            (Idle, PlayerPressed(player)) => State::running(player.other()),

            (RunningP1, PlayerPressed(Player::One)) => RunningP2,
            (RunningP2, PlayerPressed(Player::Two)) => RunningP1,

            (RunningP1, TimeExpired) => Over(Player::One),
            (RunningP2, TimeExpired) => Over(Player::Two),

            // Everything else leaves state unchanged
            (state, _) => state,
        }
    }
}
