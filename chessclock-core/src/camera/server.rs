//! Peripheral side of the camera link
//!
//! Waits for `SNAP`, captures a frame and replies with either
//! `SIZE:<N>\n<N bytes>FRAME_END\n` or `ERROR:<reason>\n`. Any other line is
//! ignored so the host can resynchronise by simply sending `SNAP` again.

use chessclock_protocol::snap::{error_line, frame_end_line, is_snap_command, size_line};
use chessclock_protocol::LineBuffer;
use embedded_io::{Read, ReadReady, Write};

use crate::log::{debug, info, warn};
use crate::traits::{CaptureError, ImageSource};

/// Command bytes processed per poll
const POLL_BUDGET: usize = 128;

/// Link failure while serving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServeError {
    /// Serial link read or write failed
    Link,
}

/// What one poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServeOutcome {
    /// No complete command yet
    Idle,
    /// A frame of this many bytes was sent
    Served(usize),
    /// Capture failed and `ERROR:` was sent
    CaptureFailed(CaptureError),
}

/// Answers `SNAP` requests from the clock
pub struct ImageCaptureServer<'a, L, S> {
    link: L,
    source: S,
    frame: &'a mut [u8],
    lines: LineBuffer,
}

impl<'a, L, S> ImageCaptureServer<'a, L, S>
where
    L: Read + Write + ReadReady,
    S: ImageSource,
{
    /// Serve frames captured into `frame`
    pub fn new(link: L, source: S, frame: &'a mut [u8]) -> Self {
        Self {
            link,
            source,
            frame,
            lines: LineBuffer::new(),
        }
    }

    /// Underlying link
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Process pending command bytes
    ///
    /// Serves at most one `SNAP` per call.
    pub fn poll(&mut self) -> Result<ServeOutcome, ServeError> {
        for _ in 0..POLL_BUDGET {
            if !self.link.read_ready().map_err(|_| ServeError::Link)? {
                break;
            }

            let mut byte = [0u8; 1];
            if self.link.read(&mut byte).map_err(|_| ServeError::Link)? == 0 {
                break;
            }

            let snap = match self.lines.feed(byte[0]) {
                None => false,
                Some(Ok(line)) if is_snap_command(line) => true,
                Some(Ok(line)) => {
                    warn!("unknown command: {=str}", line);
                    false
                }
                Some(Err(error)) => {
                    warn!("discarding command line: {}", error);
                    false
                }
            };
            if snap {
                return self.serve();
            }
        }
        Ok(ServeOutcome::Idle)
    }

    fn serve(&mut self) -> Result<ServeOutcome, ServeError> {
        debug!("capturing frame");
        let size = match self.source.capture_frame(self.frame) {
            Ok(0) => Err(CaptureError::CaptureFail),
            Ok(size) if size > self.frame.len() => Err(CaptureError::FrameTooLarge),
            other => other,
        };

        match size {
            Ok(size) => {
                self.send_frame(size)?;
                info!("sent {} byte frame", size);
                Ok(ServeOutcome::Served(size))
            }
            Err(error) => {
                warn!("capture failed: {}", error);
                self.write(error_line(error.reason()).as_bytes())?;
                self.link.flush().map_err(|_| ServeError::Link)?;
                Ok(ServeOutcome::CaptureFailed(error))
            }
        }
    }

    fn send_frame(&mut self, size: usize) -> Result<(), ServeError> {
        let header = size_line(size).map_err(|_| ServeError::Link)?;
        self.write(header.as_bytes())?;
        self.link
            .write_all(&self.frame[..size])
            .map_err(|_| ServeError::Link)?;
        // Body must be fully out before the terminator
        self.link.flush().map_err(|_| ServeError::Link)?;
        self.write(frame_end_line())?;
        self.link.flush().map_err(|_| ServeError::Link)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ServeError> {
        self.link.write_all(bytes).map_err(|_| ServeError::Link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedLink;

    /// Produces a fixed frame or a fixed error
    struct FixedSource {
        result: Result<&'static [u8], CaptureError>,
        captures: usize,
    }

    impl ImageSource for FixedSource {
        fn capture_frame(&mut self, buffer: &mut [u8]) -> Result<usize, CaptureError> {
            self.captures += 1;
            let frame = self.result?;
            let target = buffer.get_mut(..frame.len()).ok_or(CaptureError::FrameTooLarge)?;
            target.copy_from_slice(frame);
            Ok(frame.len())
        }
    }

    fn source(result: Result<&'static [u8], CaptureError>) -> FixedSource {
        FixedSource { result, captures: 0 }
    }

    #[test]
    fn test_serves_frame() {
        let mut frame = [0u8; 64];
        let mut server =
            ImageCaptureServer::new(ScriptedLink::new(b"SNAP\n"), source(Ok(b"\xff\xd8JPEG")), &mut frame);

        assert_eq!(server.poll(), Ok(ServeOutcome::Served(6)));
        assert_eq!(server.link().written, b"SIZE:6\n\xff\xd8JPEGFRAME_END\n");
    }

    #[test]
    fn test_crlf_command_accepted() {
        let mut frame = [0u8; 8];
        let mut server =
            ImageCaptureServer::new(ScriptedLink::new(b"SNAP\r\n"), source(Ok(b"ab")), &mut frame);
        assert_eq!(server.poll(), Ok(ServeOutcome::Served(2)));
    }

    #[test]
    fn test_capture_failure_sends_error() {
        let mut frame = [0u8; 8];
        let mut server = ImageCaptureServer::new(
            ScriptedLink::new(b"SNAP\n"),
            source(Err(CaptureError::CaptureFail)),
            &mut frame,
        );

        assert_eq!(
            server.poll(),
            Ok(ServeOutcome::CaptureFailed(CaptureError::CaptureFail))
        );
        assert_eq!(server.link().written, b"ERROR:capture_fail\n");
    }

    #[test]
    fn test_frame_too_large() {
        let mut frame = [0u8; 4];
        let mut server =
            ImageCaptureServer::new(ScriptedLink::new(b"SNAP\n"), source(Ok(b"too long")), &mut frame);

        assert_eq!(
            server.poll(),
            Ok(ServeOutcome::CaptureFailed(CaptureError::FrameTooLarge))
        );
        assert_eq!(server.link().written, b"ERROR:frame_too_large\n");
    }

    #[test]
    fn test_empty_frame_is_failure() {
        let mut frame = [0u8; 4];
        let mut server =
            ImageCaptureServer::new(ScriptedLink::new(b"SNAP\n"), source(Ok(b"")), &mut frame);

        assert_eq!(
            server.poll(),
            Ok(ServeOutcome::CaptureFailed(CaptureError::CaptureFail))
        );
    }

    #[test]
    fn test_unknown_commands_ignored() {
        let mut frame = [0u8; 8];
        let mut server = ImageCaptureServer::new(
            ScriptedLink::new(b"HELLO\nsnap\n"),
            source(Ok(b"ab")),
            &mut frame,
        );

        assert_eq!(server.poll(), Ok(ServeOutcome::Idle));
        assert!(server.link().written.is_empty());
    }

    #[test]
    fn test_one_request_per_poll() {
        let mut frame = [0u8; 8];
        let mut server =
            ImageCaptureServer::new(ScriptedLink::new(b"SNAP\nSNAP\n"), source(Ok(b"ab")), &mut frame);

        assert_eq!(server.poll(), Ok(ServeOutcome::Served(2)));
        assert_eq!(server.poll(), Ok(ServeOutcome::Served(2)));
        assert_eq!(server.poll(), Ok(ServeOutcome::Idle));
        assert_eq!(server.source.captures, 2);
    }

    #[test]
    fn test_partial_command_waits() {
        let mut frame = [0u8; 8];
        let mut server =
            ImageCaptureServer::new(ScriptedLink::new(b"SN"), source(Ok(b"ab")), &mut frame);
        assert_eq!(server.poll(), Ok(ServeOutcome::Idle));

        server.link.push_incoming(b"AP\n");
        assert_eq!(server.poll(), Ok(ServeOutcome::Served(2)));
    }
}
