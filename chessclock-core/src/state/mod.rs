//! Game state machine
//!
//! The clock is in exactly one state at a time. Transitions are a pure
//! function of the current state and an event; timekeeping lives in
//! [`crate::clock::GameClock`].

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Player, State};
