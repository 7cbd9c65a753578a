//! Clock display trait

use crate::clock::ClockSnapshot;

/// Something that can show the clock faces
///
/// Rendering is best effort: a failed update is logged by the caller and
/// the next refresh tries again.
pub trait ClockDisplay {
    /// Error type for display operations
    type Error;

    /// Show `snapshot`
    ///
    /// `full_redraw` is set after a button press, when the whole screen
    /// should be rewritten rather than just the changed fields.
    fn render(&mut self, snapshot: &ClockSnapshot, full_redraw: bool) -> Result<(), Self::Error>;
}

/// A clock without a display
impl ClockDisplay for () {
    type Error = core::convert::Infallible;

    fn render(&mut self, _snapshot: &ClockSnapshot, _full_redraw: bool) -> Result<(), Self::Error> {
        Ok(())
    }
}
