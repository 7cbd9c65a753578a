//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations. Pins, serial links and delays use
//! the `embedded-hal` / `embedded-io` traits directly.

pub mod camera;
pub mod display;

pub use camera::{CaptureError, ImageSource};
pub use display::ClockDisplay;
