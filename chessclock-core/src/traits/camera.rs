//! Camera sensor trait for the capture peripheral

/// Reasons a frame could not be captured
///
/// Each maps to the reason string sent in `ERROR:<reason>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Sensor did not produce a frame
    CaptureFail,
    /// Frame does not fit the capture buffer
    FrameTooLarge,
    /// Sensor did not finish in time
    Timeout,
    /// Bus error talking to the sensor
    Bus,
}

impl CaptureError {
    /// Reason string for the wire
    pub fn reason(&self) -> &'static str {
        match self {
            CaptureError::CaptureFail => "capture_fail",
            CaptureError::FrameTooLarge => "frame_too_large",
            CaptureError::Timeout => "capture_timeout",
            CaptureError::Bus => "bus_error",
        }
    }
}

/// Source of encoded (JPEG) frames
pub trait ImageSource {
    /// Capture one frame into `buffer`
    ///
    /// Returns the number of bytes written, which must not exceed
    /// `buffer.len()`.
    fn capture_frame(&mut self, buffer: &mut [u8]) -> Result<usize, CaptureError>;
}
