//! SNAP camera link messages
//!
//! Command and reply lines for the host ↔ camera byte stream. The binary
//! body that follows a `SIZE` line is not handled here; see
//! [`crate::transfer`].

use core::fmt::Write;

use heapless::String;

/// Capture command sent by the host
pub const CMD_SNAP: &str = "SNAP";

/// Prefix of the body length announcement
pub const SIZE_PREFIX: &str = "SIZE:";

/// Prefix of a capture failure report
pub const ERROR_PREFIX: &str = "ERROR:";

/// Terminator line following the body
pub const FRAME_END: &str = "FRAME_END";

/// Longest encoded reply header (`SIZE:` plus a 20-digit integer and `\n`)
pub const MAX_HEADER_LEN: usize = 32;

/// A classified reply line from the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply<'a> {
    /// `SIZE:<N>` with a numeric length
    Size(usize),
    /// `SIZE:` followed by something that is not a length
    InvalidSize(&'a str),
    /// `ERROR:<reason>`
    Error(&'a str),
    /// `FRAME_END`
    FrameEnd,
    /// Anything else (debug chatter, line noise)
    Other(&'a str),
}

impl<'a> Reply<'a> {
    /// Classify an already trimmed line
    pub fn parse(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix(SIZE_PREFIX) {
            let rest = rest.trim();
            match rest.parse::<usize>() {
                Ok(size) => Reply::Size(size),
                Err(_) => Reply::InvalidSize(rest),
            }
        } else if let Some(reason) = line.strip_prefix(ERROR_PREFIX) {
            Reply::Error(reason.trim())
        } else if line == FRAME_END {
            Reply::FrameEnd
        } else {
            Reply::Other(line)
        }
    }
}

/// Check whether a trimmed line is the capture command
pub fn is_snap_command(line: &str) -> bool {
    line == CMD_SNAP
}

/// The command line as sent on the wire
pub const fn snap_command() -> &'static [u8] {
    b"SNAP\n"
}

/// The terminator line as sent on the wire
pub const fn frame_end_line() -> &'static [u8] {
    b"FRAME_END\n"
}

/// Encode the `SIZE:<N>\n` header
pub fn size_line(size: usize) -> Result<String<MAX_HEADER_LEN>, core::fmt::Error> {
    let mut line = String::new();
    writeln!(line, "{}{}", SIZE_PREFIX, size)?;
    Ok(line)
}

/// Encode the `ERROR:<reason>\n` line
///
/// Over-long reasons are truncated so the line always fits.
pub fn error_line(reason: &str) -> String<MAX_HEADER_LEN> {
    let mut line: String<MAX_HEADER_LEN> = String::new();
    let _ = line.push_str(ERROR_PREFIX);
    let room = MAX_HEADER_LEN - ERROR_PREFIX.len() - 1;
    for ch in reason.chars().filter(|c| *c != '\n') {
        if line.len() + ch.len_utf8() > ERROR_PREFIX.len() + room {
            break;
        }
        let _ = line.push(ch);
    }
    let _ = line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(Reply::parse("SIZE:5"), Reply::Size(5));
        assert_eq!(Reply::parse("SIZE: 30720"), Reply::Size(30720));
        assert_eq!(Reply::parse("SIZE:0"), Reply::Size(0));
    }

    #[test]
    fn test_parse_invalid_size() {
        assert_eq!(Reply::parse("SIZE:abc"), Reply::InvalidSize("abc"));
        assert_eq!(Reply::parse("SIZE:"), Reply::InvalidSize(""));
        assert_eq!(Reply::parse("SIZE:-4"), Reply::InvalidSize("-4"));
    }

    #[test]
    fn test_parse_error() {
        assert_eq!(Reply::parse("ERROR:CaptureFail"), Reply::Error("CaptureFail"));
    }

    #[test]
    fn test_parse_frame_end_and_other() {
        assert_eq!(Reply::parse("FRAME_END"), Reply::FrameEnd);
        assert_eq!(Reply::parse("Photo sent."), Reply::Other("Photo sent."));
        // Must match exactly
        assert_eq!(Reply::parse("FRAME_END!"), Reply::Other("FRAME_END!"));
    }

    #[test]
    fn test_size_line() {
        assert_eq!(size_line(1234).unwrap().as_str(), "SIZE:1234\n");
        // Largest possible length still fits the header buffer
        assert!(size_line(usize::MAX).unwrap().ends_with('\n'));
    }

    #[test]
    fn test_error_line_truncates() {
        assert_eq!(error_line("CaptureFail").as_str(), "ERROR:CaptureFail\n");

        let long = error_line("a reason that is far too long to fit in one header");
        assert_eq!(long.len(), MAX_HEADER_LEN);
        assert!(long.ends_with('\n'));
        assert!(long.starts_with(ERROR_PREFIX));
    }

    #[test]
    fn test_snap_command() {
        assert!(is_snap_command("SNAP"));
        assert!(!is_snap_command("snap"));
        assert_eq!(snap_command(), b"SNAP\n");
    }
}
