//! Display drivers

pub mod hd44780;

pub use hd44780::{Hd44780, DEFAULT_ADDRESS};
