//! Host side of the camera link

use chessclock_hal::Monotonic;
use chessclock_protocol::snap::snap_command;
use chessclock_protocol::{ImageTransfer, LineBuffer, LineOutcome, Phase, TransferError};
use embedded_hal::delay::DelayNs;
use embedded_io::{Read, ReadReady, Write};

use crate::log::{debug, info, warn};
use crate::time::elapsed_ms;

/// Reads serviced per poll before yielding, so a chattering peripheral
/// cannot hold off the deadline check
const POLL_BUDGET: usize = 256;

/// Why an image could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RetrievalError {
    /// Serial link read or write failed
    Link,
    /// Peripheral reply rejected the transfer
    Protocol(TransferError),
    /// Deadline passed before `FRAME_END`
    Timeout { phase: Phase, received: usize },
}

impl From<TransferError> for RetrievalError {
    fn from(error: TransferError) -> Self {
        RetrievalError::Protocol(error)
    }
}

/// Requests frames over a serial link
pub struct ImageRetrievalClient<L> {
    link: L,
    timeout_ms: u32,
    poll_interval_us: u32,
    lines: LineBuffer,
}

impl<L> ImageRetrievalClient<L>
where
    L: Read + Write + ReadReady,
{
    /// Create a client on `link`
    ///
    /// A transfer fails once `timeout_ms` has elapsed since the request was
    /// sent. Between polls of the link the client sleeps `poll_interval_us`.
    pub fn new(link: L, timeout_ms: u32, poll_interval_us: u32) -> Self {
        Self {
            link,
            timeout_ms,
            poll_interval_us,
            lines: LineBuffer::new(),
        }
    }

    /// Underlying link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Underlying link, mutably
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Request one frame and receive it into `buffer`
    ///
    /// Returns the number of image bytes at the start of `buffer`. Blocks
    /// for at most the configured timeout. On failure `buffer` may hold a
    /// partial body, which must not be used.
    pub fn retrieve<C, D>(
        &mut self,
        buffer: &mut [u8],
        clock: &C,
        delay: &mut D,
    ) -> Result<usize, RetrievalError>
    where
        C: Monotonic,
        D: DelayNs,
    {
        let mut transfer = ImageTransfer::new(buffer.len());
        self.lines.reset();

        info!("requesting image from camera");
        self.link
            .write_all(snap_command())
            .map_err(|_| RetrievalError::Link)?;
        self.link.flush().map_err(|_| RetrievalError::Link)?;

        let started = clock.now_ms();
        loop {
            if elapsed_ms(started, clock.now_ms()) >= self.timeout_ms {
                warn!(
                    "camera timeout in {}, {}/{} bytes",
                    transfer.phase(),
                    transfer.bytes_received(),
                    transfer.expected_size()
                );
                return Err(RetrievalError::Timeout {
                    phase: transfer.phase(),
                    received: transfer.bytes_received(),
                });
            }

            if let Some(size) = self.poll(&mut transfer, buffer)? {
                info!("received {} image bytes", size);
                return Ok(size);
            }

            delay.delay_us(self.poll_interval_us);
        }
    }

    /// Drain whatever the link has ready into the transfer
    fn poll(
        &mut self,
        transfer: &mut ImageTransfer,
        buffer: &mut [u8],
    ) -> Result<Option<usize>, RetrievalError> {
        for _ in 0..POLL_BUDGET {
            if !self.link.read_ready().map_err(|_| RetrievalError::Link)? {
                break;
            }

            if transfer.phase() == Phase::ReceivingBody {
                let window = transfer.body_window();
                let count = self
                    .link
                    .read(&mut buffer[window])
                    .map_err(|_| RetrievalError::Link)?;
                if count == 0 {
                    break;
                }
                transfer.on_body(count);
                continue;
            }

            let mut byte = [0u8; 1];
            if self.link.read(&mut byte).map_err(|_| RetrievalError::Link)? == 0 {
                break;
            }

            let line = match self.lines.feed(byte[0]) {
                None => continue,
                Some(Ok(line)) => line,
                Some(Err(error)) => {
                    warn!("discarding camera line: {}", error);
                    continue;
                }
            };

            match transfer.on_line(line) {
                Ok(LineOutcome::SizeAccepted(size)) => debug!("expecting {} bytes", size),
                Ok(LineOutcome::Ignored) => warn!("unexpected camera line: {=str}", line),
                Ok(LineOutcome::Complete(size)) => return Ok(Some(size)),
                Err(error) => {
                    warn!("camera transfer rejected: {}", error);
                    return Err(error.into());
                }
            }
        }
        Ok(None)
    }
}
