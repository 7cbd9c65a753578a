//! Cooperative main loop
//!
//! One [`Scheduler::run_once`] pass polls the buttons, advances the clock,
//! refreshes the display and reconciles the connection state. Everything runs
//! to completion on a single thread; only the connection flag is shared with
//! the radio callbacks.

pub mod executor;

pub use executor::{Devices, Scheduler, StepReport, MAX_TRANSITIONS_PER_STEP};
