//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in chessclock-core:
//!
//! - Character LCD (HD44780 behind a PCF8574 I2C expander) as a
//!   [`ClockDisplay`](chessclock_core::traits::ClockDisplay)
//! - ArduChip SPI frame buffer camera as an
//!   [`ImageSource`](chessclock_core::traits::ImageSource)

#![no_std]
#![deny(unsafe_code)]

pub mod camera;
pub mod display;
