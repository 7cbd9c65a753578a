//! Image receive state machine
//!
//! Tracks one `SNAP` exchange from the host's point of view:
//!
//! ```text
//! AwaitingSize ──SIZE:N──▶ ReceivingBody ──N bytes──▶ AwaitingTerminator ──FRAME_END──▶ Complete
//!      │                                                     │
//!      └── ERROR / bad size ──▶ (error)        other lines ──┘ (ignored)
//! ```
//!
//! The machine never touches the link or the body buffer itself. The caller
//! feeds it whole lines while a line is expected and reports how many body
//! bytes it copied while the body is being received.

use heapless::String;

use crate::snap::Reply;

/// Longest peripheral error reason kept for diagnostics
pub const MAX_REASON_LEN: usize = 24;

/// Transfer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for `SIZE:<N>` (or `ERROR:`)
    AwaitingSize,
    /// Copying raw body bytes
    ReceivingBody,
    /// Body complete, waiting for `FRAME_END`
    AwaitingTerminator,
    /// Terminator seen; transfer succeeded
    Complete,
}

/// Errors that abort a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// `SIZE:` was not followed by a number
    InvalidSize,
    /// `SIZE:0`
    ZeroSize,
    /// Declared size does not fit the receive buffer
    Oversize { declared: usize, capacity: usize },
    /// Peripheral reported `ERROR:<reason>`
    Peripheral(String<MAX_REASON_LEN>),
}

/// Result of feeding one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineOutcome {
    /// Size accepted; body of this many bytes follows
    SizeAccepted(usize),
    /// Line did not advance the transfer
    Ignored,
    /// `FRAME_END` received; the body is this many bytes
    Complete(usize),
}

/// State of one image transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTransfer {
    /// Receive buffer capacity
    capacity: usize,
    /// Declared body length (0 until known)
    expected_size: usize,
    /// Body bytes received so far
    bytes_received: usize,
    phase: Phase,
}

impl ImageTransfer {
    /// Start a transfer into a buffer of `capacity` bytes
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            expected_size: 0,
            bytes_received: 0,
            phase: Phase::AwaitingSize,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Declared body size, 0 if not yet known
    pub fn expected_size(&self) -> usize {
        self.expected_size
    }

    /// Body bytes received so far
    pub fn bytes_received(&self) -> usize {
        self.bytes_received
    }

    /// Buffer range the next body bytes must be written to
    ///
    /// Empty unless the transfer is in [`Phase::ReceivingBody`]. Never
    /// extends past the declared size.
    pub fn body_window(&self) -> core::ops::Range<usize> {
        match self.phase {
            Phase::ReceivingBody => self.bytes_received..self.expected_size,
            _ => self.bytes_received..self.bytes_received,
        }
    }

    /// Feed a trimmed line
    pub fn on_line(&mut self, line: &str) -> Result<LineOutcome, TransferError> {
        match self.phase {
            Phase::AwaitingSize => self.on_size_line(line),
            Phase::AwaitingTerminator => match Reply::parse(line) {
                Reply::FrameEnd => {
                    self.phase = Phase::Complete;
                    Ok(LineOutcome::Complete(self.bytes_received))
                }
                _ => Ok(LineOutcome::Ignored),
            },
            Phase::ReceivingBody | Phase::Complete => Ok(LineOutcome::Ignored),
        }
    }

    fn on_size_line(&mut self, line: &str) -> Result<LineOutcome, TransferError> {
        match Reply::parse(line) {
            Reply::Size(0) => Err(TransferError::ZeroSize),
            Reply::Size(declared) if declared > self.capacity => Err(TransferError::Oversize {
                declared,
                capacity: self.capacity,
            }),
            Reply::Size(size) => {
                self.expected_size = size;
                self.bytes_received = 0;
                self.phase = Phase::ReceivingBody;
                Ok(LineOutcome::SizeAccepted(size))
            }
            Reply::InvalidSize(_) => Err(TransferError::InvalidSize),
            Reply::Error(reason) => Err(TransferError::Peripheral(truncate_reason(reason))),
            Reply::FrameEnd | Reply::Other(_) => Ok(LineOutcome::Ignored),
        }
    }

    /// Record `count` body bytes written into [`body_window`](Self::body_window)
    ///
    /// Counts beyond the window are clamped. Returns true once the body is
    /// complete.
    pub fn on_body(&mut self, count: usize) -> bool {
        if self.phase != Phase::ReceivingBody {
            return false;
        }

        let room = self.expected_size - self.bytes_received;
        self.bytes_received += count.min(room);

        if self.bytes_received == self.expected_size {
            self.phase = Phase::AwaitingTerminator;
            true
        } else {
            false
        }
    }
}

fn truncate_reason(reason: &str) -> String<MAX_REASON_LEN> {
    let mut out = String::new();
    for ch in reason.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
