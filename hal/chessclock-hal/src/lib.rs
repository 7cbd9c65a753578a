//! Chess clock Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the chess clock logic
//! is written against. Chip-specific crates implement them so the same core
//! can run on the RP2040 boards and on the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (host controller, camera)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chessclock-core / chessclock-protocol  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chessclock-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ chessclock-hal-   │
//!           │     rp2040        │
//!           └───────────────────┘
//! ```
//!
//! Digital inputs, delays and byte streams are not redefined here: the core
//! uses `embedded-hal` and `embedded-io` for those directly.
//!
//! # Traits
//!
//! - [`time::Monotonic`] - Wrapping millisecond time source
//! - [`radio::NotifyChannel`] - Fire-and-forget wireless notifications
//! - [`radio::Advertiser`] - Re-announce availability after a disconnect
//! - [`radio::ConnectionEvents`] - Connect/disconnect callbacks from the radio stack

#![no_std]
#![deny(unsafe_code)]

pub mod radio;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use radio::{Advertiser, ConnectionEvents, NotifyChannel};
pub use time::Monotonic;
pub use uart::UartConfig;
