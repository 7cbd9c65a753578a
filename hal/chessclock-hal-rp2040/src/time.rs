//! Monotonic time source backed by the embassy time driver

use chessclock_hal::Monotonic;
use embassy_time::Instant;

/// Millisecond clock reading `embassy_time::Instant`
///
/// The 64-bit uptime is truncated to 32 bits, so readings wrap after
/// about 49.7 days exactly like the core expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
