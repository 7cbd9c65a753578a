//! Per-channel debouncing
//!
//! Each channel remembers the last raw reading, the accepted (debounced)
//! level, and when the raw reading last changed. A new level is accepted
//! only once the raw reading has held still for longer than the debounce
//! window; a press is reported when the accepted level becomes low.

use embedded_hal::digital::PinState;

use crate::log::debug;
use crate::time::elapsed_ms;

/// Debounce state of one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputChannel {
    /// Level seen on the previous sample
    raw_level: PinState,
    /// Level accepted after filtering
    debounced_level: PinState,
    /// When `raw_level` last changed (ms)
    last_change_ms: u32,
}

impl InputChannel {
    /// Released (high) channel with no recorded change
    pub const fn released() -> Self {
        Self {
            raw_level: PinState::High,
            debounced_level: PinState::High,
            last_change_ms: 0,
        }
    }

    /// Accepted level
    pub fn debounced_level(&self) -> PinState {
        self.debounced_level
    }
}

/// A debounced press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent {
    /// Input channel index
    pub index: usize,
    /// Sample time that accepted the press (ms)
    pub at_ms: u32,
}

/// Debouncer for `N` active-low inputs
#[derive(Debug, Clone)]
pub struct Debouncer<const N: usize> {
    channels: [InputChannel; N],
    window_ms: u32,
}

impl<const N: usize> Debouncer<N> {
    /// Create a debouncer with every channel released
    pub const fn new(window_ms: u32) -> Self {
        Self {
            channels: [InputChannel::released(); N],
            window_ms,
        }
    }

    /// Channel state, if `index` is in range
    pub fn channel(&self, index: usize) -> Option<&InputChannel> {
        self.channels.get(index)
    }

    /// Feed one raw reading
    ///
    /// Returns a [`PressEvent`] when this sample makes the accepted level go
    /// low. An out-of-range `index` is ignored.
    pub fn sample(&mut self, index: usize, level: PinState, now_ms: u32) -> Option<PressEvent> {
        let window_ms = self.window_ms;
        let channel = self.channels.get_mut(index)?;

        if level != channel.raw_level {
            channel.last_change_ms = now_ms;
        }
        channel.raw_level = level;

        if elapsed_ms(channel.last_change_ms, now_ms) <= window_ms {
            return None;
        }
        if level == channel.debounced_level {
            return None;
        }

        channel.debounced_level = level;
        if level == PinState::Low {
            debug!("button {} pressed at {} ms", index, now_ms);
            Some(PressEvent { index, at_ms: now_ms })
        } else {
            None
        }
    }
}
