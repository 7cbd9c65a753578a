//! Events that trigger state transitions

use super::machine::Player;
use crate::input::Button;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Reset button pressed
    ResetPressed,
    /// A player's button pressed
    PlayerPressed(Player),
    /// The running player's remaining time reached zero
    TimeExpired,
}

impl Event {
    /// Event raised by a debounced press of `button`
    pub fn from_button(button: Button) -> Self {
        match button {
            Button::Reset => Event::ResetPressed,
            Button::Player1 => Event::PlayerPressed(Player::One),
            Button::Player2 => Event::PlayerPressed(Player::Two),
        }
    }
}
