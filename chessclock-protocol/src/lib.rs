//! Chess clock wire protocols
//!
//! Two links leave the host controller:
//!
//! # Camera link (UART, host ↔ camera peripheral)
//!
//! Newline-terminated ASCII lines interleaved with a raw binary body:
//! ```text
//! host   → camera   SNAP\n
//! camera → host     SIZE:<N>\n  <N raw bytes>  FRAME_END\n
//!              or   ERROR:<reason>\n
//! ```
//! [`line::LineBuffer`] assembles lines, [`snap`] encodes and classifies
//! them, and [`transfer::ImageTransfer`] is the receive state machine. None of
//! these perform I/O, so they are tested by feeding bytes directly.
//!
//! # Notification channel (BLE, host → companion app)
//!
//! Status updates are compact JSON objects ([`status::StatusMessage`]).
//! Images are pushed as a start marker, fixed-size raw chunks and an end
//! marker ([`fragment::Fragments`]):
//! ```text
//! {"type":"image_start","size":N}
//! <20 bytes> <20 bytes> ... <≤20 bytes>
//! {"type":"image_end"}
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod fragment;
pub mod line;
pub mod snap;
pub mod status;
pub mod transfer;

pub use fragment::{Fragment, Fragments, IMAGE_CHUNK_SIZE, IMAGE_END_MARKER};
pub use line::{LineBuffer, LineError, MAX_LINE_LEN};
pub use snap::{Reply, CMD_SNAP, FRAME_END};
pub use status::StatusMessage;
pub use transfer::{ImageTransfer, LineOutcome, Phase, TransferError};
