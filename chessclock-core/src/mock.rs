//! Test doubles for the hardware seams

use core::cell::Cell;
use core::convert::Infallible;

use std::vec::Vec;

use chessclock_hal::{Advertiser, Monotonic, NotifyChannel};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin};
use embedded_io::{ErrorType, Read, ReadReady, Write};

use crate::clock::ClockSnapshot;
use crate::traits::ClockDisplay;

/// Millisecond clock advanced by [`MockDelay`]
#[derive(Debug, Default)]
pub struct MockTime {
    now_ms: Cell<u32>,
    carry_ns: Cell<u64>,
}

impl MockTime {
    pub fn at(now_ms: u32) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            carry_ns: Cell::new(0),
        }
    }

    pub fn advance_ms(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get().wrapping_add(ms));
    }

    fn advance_ns(&self, ns: u32) {
        let total = self.carry_ns.get() + u64::from(ns);
        self.carry_ns.set(total % 1_000_000);
        self.advance_ms((total / 1_000_000) as u32);
    }
}

impl Monotonic for MockTime {
    fn now_ms(&self) -> u32 {
        self.now_ms.get()
    }
}

/// Delay that moves a [`MockTime`] forward instead of sleeping
pub struct MockDelay<'a> {
    pub time: &'a MockTime,
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance_ns(ns);
    }
}

/// Serial link replaying a script and recording writes
#[derive(Debug, Default)]
pub struct ScriptedLink {
    incoming: Vec<u8>,
    position: usize,
    /// Largest read served at once
    max_read: usize,
    /// Report not-ready after this many reads in a row
    burst: Option<usize>,
    reads_in_burst: usize,
    pub written: Vec<u8>,
}

impl ScriptedLink {
    pub fn new(incoming: &[u8]) -> Self {
        Self {
            incoming: incoming.to_vec(),
            max_read: usize::MAX,
            ..Self::default()
        }
    }

    /// Serve at most `max_read` bytes per read
    pub fn with_max_read(mut self, max_read: usize) -> Self {
        self.max_read = max_read;
        self
    }

    /// Go idle for one poll after every `reads` reads
    pub fn with_burst(mut self, reads: usize) -> Self {
        self.burst = Some(reads);
        self
    }

    pub fn push_incoming(&mut self, bytes: &[u8]) {
        self.incoming.extend_from_slice(bytes);
    }

    pub fn remaining(&self) -> usize {
        self.incoming.len() - self.position
    }
}

impl ErrorType for ScriptedLink {
    type Error = Infallible;
}

impl ReadReady for ScriptedLink {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if let Some(burst) = self.burst {
            if self.reads_in_burst >= burst {
                self.reads_in_burst = 0;
                return Ok(false);
            }
        }
        Ok(self.remaining() > 0)
    }
}

impl Read for ScriptedLink {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let count = buf.len().min(self.remaining()).min(self.max_read);
        buf[..count].copy_from_slice(&self.incoming[self.position..self.position + count]);
        self.position += count;
        self.reads_in_burst += 1;
        Ok(count)
    }
}

impl Write for ScriptedLink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Notification channel recording every message
#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub connected: bool,
    pub messages: Vec<Vec<u8>>,
    /// Drop the connection after this many messages
    pub disconnect_after: Option<usize>,
    pub advertise_calls: usize,
}

impl RecordingChannel {
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub fn text(&self, index: usize) -> &str {
        core::str::from_utf8(&self.messages[index]).unwrap_or("<binary>")
    }
}

impl NotifyChannel for RecordingChannel {
    type Error = ();

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn notify(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        if !self.connected {
            return Err(());
        }
        self.messages.push(payload.to_vec());
        if self.disconnect_after == Some(self.messages.len()) {
            self.connected = false;
        }
        Ok(())
    }
}

impl Advertiser for RecordingChannel {
    type Error = ();

    fn restart_advertising(&mut self) -> Result<(), Self::Error> {
        self.advertise_calls += 1;
        Ok(())
    }
}

/// Active-low button whose level the test controls
pub struct MockButton<'a> {
    pub pressed: &'a Cell<bool>,
}

impl PinErrorType for MockButton<'_> {
    type Error = Infallible;
}

impl InputPin for MockButton<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed.get())
    }
}

/// Display recording every rendered snapshot
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub frames: Vec<(ClockSnapshot, bool)>,
}

impl ClockDisplay for RecordingDisplay {
    type Error = Infallible;

    fn render(&mut self, snapshot: &ClockSnapshot, full_redraw: bool) -> Result<(), Self::Error> {
        self.frames.push((*snapshot, full_redraw));
        Ok(())
    }
}
