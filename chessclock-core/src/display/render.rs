//! 16x2 clock face layout
//!
//! ```text
//! P1:08:59.4  <--
//! P2:09:00.0
//! ```
//!
//! The indicator column shows the running side, `IDLE` before the first
//! move, or `OVER` and the winner once a flag falls.

use core::fmt::Write;

use heapless::String;

use crate::clock::ClockSnapshot;
use crate::state::{Player, State};

/// Characters per row
pub const FACE_COLUMNS: usize = 16;

/// Column where the status indicator starts
pub const INDICATOR_COLUMN: usize = 12;

/// Longest `MM:SS.T` rendering of a `u32` millisecond value
const MAX_TIME_LEN: usize = 10;

/// Format milliseconds as `MM:SS.T`
///
/// Minutes are not wrapped, so more than 99 minutes widens the field.
pub fn format_time(ms: u32) -> String<MAX_TIME_LEN> {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let tenths = (ms % 1000) / 100;

    let mut out = String::new();
    // Cannot overflow: u32::MAX ms is "71582:47.2"
    let _ = write!(out, "{:02}:{:02}.{}", minutes, seconds, tenths);
    out
}

/// Rendered text of both rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    pub rows: [String<FACE_COLUMNS>; 2],
}

impl ClockFace {
    /// Lay out `snapshot`
    pub fn new(snapshot: &ClockSnapshot) -> Self {
        let (top, bottom) = indicators(snapshot.state);
        Self {
            rows: [
                row("P1:", snapshot.p1_remaining_ms, top),
                row("P2:", snapshot.p2_remaining_ms, bottom),
            ],
        }
    }

    /// Text of `row` (0 or 1)
    pub fn row(&self, row: usize) -> &str {
        self.rows.get(row).map_or("", |r| r.as_str())
    }
}

fn indicators(state: State) -> (&'static str, &'static str) {
    match state {
        State::Idle => ("IDLE", ""),
        State::RunningP1 => ("<--", ""),
        State::RunningP2 => ("", "<--"),
        State::Over(Player::One) => ("OVER", "P2 W"),
        State::Over(Player::Two) => ("OVER", "P1 W"),
    }
}

fn row(label: &str, ms: u32, indicator: &str) -> String<FACE_COLUMNS> {
    let mut out: String<FACE_COLUMNS> = String::new();
    // Pushes past the row width are dropped, like the glass would
    let _ = out.push_str(label);
    let _ = out.push_str(&format_time(ms));
    while out.len() < INDICATOR_COLUMN {
        let _ = out.push(' ');
    }
    for c in indicator.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
