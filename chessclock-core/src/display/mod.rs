//! Clock face layout and refresh policy
//!
//! Text layout is shared by every character display driver; the
//! [`DisplayThrottle`] decides when a refresh is worth the bus traffic.

pub mod render;
pub mod throttle;

pub use render::{format_time, ClockFace, FACE_COLUMNS, INDICATOR_COLUMN};
pub use throttle::DisplayThrottle;
