//! Wireless notification channel abstractions
//!
//! The companion app sees a single read/write/notify endpoint. The core only
//! ever pushes notifications to it; delivery is not acknowledged.

/// Outbound notification endpoint
pub trait NotifyChannel {
    /// Error type for notify operations
    type Error;

    /// Check whether a remote endpoint is currently connected
    fn is_connected(&self) -> bool;

    /// Send one notification message
    ///
    /// The payload is delivered as a single message. Nothing is retried.
    fn notify(&mut self, payload: &[u8]) -> Result<(), Self::Error>;
}

/// Something that can make the device discoverable again
pub trait Advertiser {
    /// Error type for advertising operations
    type Error;

    /// Restart advertising after the remote endpoint went away
    fn restart_advertising(&mut self) -> Result<(), Self::Error>;
}

/// Connection callbacks invoked by the radio stack
///
/// These run outside the main loop (interrupt or radio task context).
/// Implementations must only record the change for the main loop to pick up;
/// they must never touch clock state or the image buffer.
pub trait ConnectionEvents {
    /// A remote endpoint connected
    fn on_connect(&self);

    /// The remote endpoint disconnected
    fn on_disconnect(&self);
}
