//! JPEG frame boundaries
//!
//! The sensor FIFO length is rounded up and may carry padding before the
//! start-of-image marker or after the end-of-image marker.

/// Start of image
pub const SOI: [u8; 2] = [0xFF, 0xD8];
/// End of image
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Move the JPEG in `frame` to the start of the slice and return its length
///
/// Returns `None` when either marker is missing.
pub fn trim_frame(frame: &mut [u8]) -> Option<usize> {
    let start = frame.windows(2).position(|w| w == SOI)?;
    let end = start
        + 2
        + frame[start + 2..]
            .windows(2)
            .position(|w| w == EOI)?
        + 2;

    frame.copy_within(start..end, 0);
    Some(end - start)
}
