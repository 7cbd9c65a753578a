//! Button input
//!
//! Raw pin levels are sampled once per scheduler pass and filtered by the
//! [`Debouncer`]. Buttons are active-low with pull-ups, so a press is a
//! stable transition from high to low.

pub mod button;
pub mod debounce;

pub use button::{Button, BUTTON_COUNT};
pub use debounce::{Debouncer, InputChannel, PressEvent};
