//! Board-agnostic core logic for the chess clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Game clock state machine and timekeeping
//! - Button debouncing
//! - Camera link client (host) and capture server (peripheral)
//! - Status and image publishing over the notification channel
//! - Display refresh throttling and text layout
//! - The cooperative scheduler tying it together
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod log;

pub mod camera;
pub mod clock;
pub mod config;
pub mod connection;
pub mod display;
pub mod input;
pub mod publish;
pub mod scheduler;
pub mod state;
pub mod time;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use camera::{ImageCaptureServer, ImageRetrievalClient, RetrievalError};
pub use clock::{ClockSnapshot, GameClock, Transition, TransitionKind};
pub use config::{ClockConfig, ConfigError};
pub use publish::{PublishOutcome, StatusPublisher};
pub use scheduler::{Devices, Scheduler, StepReport};
pub use state::{Event, Player, State};
