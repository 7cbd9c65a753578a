//! Newline-terminated line assembly
//!
//! Bytes arrive one at a time from a UART. A line is complete at `\n`; the
//! returned text is trimmed, so `\r\n` senders work unchanged.

use heapless::Vec;

/// Longest line either side of the camera link ever sends
pub const MAX_LINE_LEN: usize = 64;

/// Errors for a completed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer and was discarded
    Overflow,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

/// Fixed-capacity line accumulator
#[derive(Debug, Clone)]
pub struct LineBuffer<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    /// Set once the current line no longer fits; cleared at the next newline
    overflowed: bool,
    /// The buffer holds a line that was already returned
    complete: bool,
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
            complete: false,
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
        self.complete = false;
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        if self.complete {
            0
        } else {
            self.buffer.len()
        }
    }

    /// Feed one byte
    ///
    /// Returns `None` while the line is incomplete. On `\n` returns the
    /// trimmed line, or an error if it overflowed or is not UTF-8.
    pub fn feed(&mut self, byte: u8) -> Option<Result<&str, LineError>> {
        if self.complete {
            self.reset();
        }

        if byte != b'\n' {
            if !self.overflowed && self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        self.complete = true;
        if self.overflowed {
            return Some(Err(LineError::Overflow));
        }

        Some(
            core::str::from_utf8(&self.buffer)
                .map(str::trim)
                .map_err(|_| LineError::InvalidUtf8),
        )
    }
}
