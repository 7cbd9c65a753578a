//! RP2040-specific HAL for the chess clock firmware
//!
//! This crate provides RP2040 implementations of the `chessclock-hal`
//! traits, plus RP2040-specific glue:
//!
//! - Monotonic millisecond time from the embassy time driver
//! - UART pin mapping and link configuration
//! - BLE UART bridge (HM-10 style) as the notification channel

#![no_std]

pub mod radio;
pub mod time;
pub mod uart;

pub use radio::{watch_link_state, BleBridge};
pub use time::EmbassyClock;
