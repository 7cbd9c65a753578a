//! State shared between tasks

use chessclock_core::connection::ConnectionFlags;

/// Written by the STATE pin watcher, read by the clock task
pub static CONNECTION: ConnectionFlags = ConnectionFlags::new();
