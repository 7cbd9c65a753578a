//! Display refresh throttling
//!
//! A refresh happens when forced (button press), when the state changed,
//! when either clock moved by more than the refresh interval since the last
//! refresh, or when the interval itself has passed.

use crate::clock::ClockSnapshot;
use crate::time::elapsed_ms;

/// Tracks what was last shown and when
#[derive(Debug, Clone)]
pub struct DisplayThrottle {
    interval_ms: u32,
    last_update_ms: u32,
    last_shown: Option<ClockSnapshot>,
}

impl DisplayThrottle {
    /// Create a throttle; the first check always refreshes
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_update_ms: 0,
            last_shown: None,
        }
    }

    /// Decide whether to refresh now, recording the refresh if so
    pub fn check(&mut self, snapshot: &ClockSnapshot, now_ms: u32, force: bool) -> bool {
        let due = match &self.last_shown {
            None => true,
            Some(last) => {
                force
                    || last.state != snapshot.state
                    || last.p1_remaining_ms.abs_diff(snapshot.p1_remaining_ms) > self.interval_ms
                    || last.p2_remaining_ms.abs_diff(snapshot.p2_remaining_ms) > self.interval_ms
                    || elapsed_ms(self.last_update_ms, now_ms) > self.interval_ms
            }
        };

        if due {
            self.last_shown = Some(*snapshot);
            self.last_update_ms = now_ms;
        }
        due
    }
}
