//! Camera drivers

pub mod arducam;
pub mod jpeg;

pub use arducam::{Arducam, ArducamConfig};
