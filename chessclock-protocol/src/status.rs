//! Clock status messages for the companion app
//!
//! A status message is a snapshot of both clocks taken at a transition. On
//! the wire it is a compact JSON object:
//!
//! ```text
//! {"player_moved":1,"p1_time_sec":540,"p2_time_sec":532}
//! ```
//!
//! `player_moved` is 0 for a reset, otherwise the player the transition is
//! about (the mover on start and switch, the flagged player on timeout).

use core::fmt::Write;

use heapless::String;

/// Longest encoded status message
pub const MAX_STATUS_LEN: usize = 80;

/// `player_moved` code for a reset
pub const MOVED_NONE: u8 = 0;

/// Snapshot of the clocks at a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusMessage {
    /// 0 (reset), 1 or 2
    pub moved_player: u8,
    /// Player 1 remaining time in whole seconds
    pub p1_time_sec: u32,
    /// Player 2 remaining time in whole seconds
    pub p2_time_sec: u32,
}

impl StatusMessage {
    /// Build a message from millisecond clock values
    ///
    /// Seconds are truncated, so 999 ms remaining reports as 0.
    pub const fn from_millis(moved_player: u8, p1_ms: u32, p2_ms: u32) -> Self {
        Self {
            moved_player,
            p1_time_sec: p1_ms / 1000,
            p2_time_sec: p2_ms / 1000,
        }
    }

    /// Encode as the JSON object sent to the app
    pub fn to_json(&self) -> Result<String<MAX_STATUS_LEN>, core::fmt::Error> {
        let mut out = String::new();
        write!(
            out,
            "{{\"player_moved\":{},\"p1_time_sec\":{},\"p2_time_sec\":{}}}",
            self.moved_player, self.p1_time_sec, self.p2_time_sec
        )?;
        Ok(out)
    }
}
