//! Configuration types
//!
//! Board-agnostic tunables. The firmware embeds a validated copy generated
//! at build time from `clock.toml`.

pub mod types;

pub use types::*;
