//! Camera link endpoints
//!
//! Both ends of the `SNAP` exchange are built on the line assembler and
//! reply parser from `chessclock-protocol`:
//!
//! - [`ImageRetrievalClient`] runs on the clock, requests a frame and
//!   receives it into a caller-owned buffer with a hard deadline.
//! - [`ImageCaptureServer`] runs on the camera peripheral, waits for `SNAP`
//!   and streams back a captured frame.

pub mod client;
pub mod server;

pub use client::{ImageRetrievalClient, RetrievalError};
pub use server::{ImageCaptureServer, ServeError, ServeOutcome};
