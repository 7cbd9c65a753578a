//! Connection state shared with the radio callbacks
//!
//! The radio stack calls [`ConnectionEvents`] from its own context; those
//! calls only flip an atomic flag. The scheduler compares the flag with what
//! it saw on the previous pass to detect connects and disconnects.

use chessclock_hal::ConnectionEvents;
use portable_atomic::{AtomicBool, Ordering};

/// Connected flag written by radio callbacks
#[derive(Debug, Default)]
pub struct ConnectionFlags {
    connected: AtomicBool,
}

impl ConnectionFlags {
    /// Start disconnected
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
        }
    }

    /// Current flag value
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

impl ConnectionEvents for ConnectionFlags {
    fn on_connect(&self) {
        self.connected.store(true, Ordering::Release);
    }

    fn on_disconnect(&self) {
        self.connected.store(false, Ordering::Release);
    }
}

/// Edge seen by the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionChange {
    Connected,
    Disconnected,
}

/// Remembers the connection state from the previous pass
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    was_connected: bool,
}

impl ConnectionTracker {
    /// Start out assuming nothing is connected
    pub const fn new() -> Self {
        Self {
            was_connected: false,
        }
    }

    /// Compare with the current state and report any edge
    pub fn reconcile(&mut self, connected: bool) -> Option<ConnectionChange> {
        if connected == self.was_connected {
            return None;
        }
        self.was_connected = connected;
        Some(if connected {
            ConnectionChange::Connected
        } else {
            ConnectionChange::Disconnected
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_follow_callbacks() {
        let flags = ConnectionFlags::new();
        assert!(!flags.is_connected());
        flags.on_connect();
        assert!(flags.is_connected());
        flags.on_disconnect();
        assert!(!flags.is_connected());
    }

    #[test]
    fn test_tracker_reports_edges_once() {
        let mut tracker = ConnectionTracker::new();
        assert_eq!(tracker.reconcile(false), None);
        assert_eq!(tracker.reconcile(true), Some(ConnectionChange::Connected));
        assert_eq!(tracker.reconcile(true), None);
        assert_eq!(tracker.reconcile(false), Some(ConnectionChange::Disconnected));
        assert_eq!(tracker.reconcile(false), None);
    }

    #[test]
    fn test_blip_between_passes_is_invisible() {
        let flags = ConnectionFlags::new();
        let mut tracker = ConnectionTracker::new();

        flags.on_connect();
        flags.on_disconnect();
        assert_eq!(tracker.reconcile(flags.is_connected()), None);
    }
}
