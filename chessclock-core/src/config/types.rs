//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default time per player: 9 minutes
pub const DEFAULT_INITIAL_TIME_MS: u32 = 9 * 60 * 1000;

/// Default image receive buffer: 30 KiB
pub const DEFAULT_IMAGE_BUFFER_SIZE: usize = 30 * 1024;

/// Longest debounce window accepted by [`ClockConfig::validate`]
pub const MAX_DEBOUNCE_MS: u32 = 1000;

/// Clock tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default, deny_unknown_fields))]
pub struct ClockConfig {
    /// Time each player starts with (ms)
    pub initial_time_ms: u32,
    /// Button debounce window (ms)
    pub debounce_ms: u32,
    /// Give up on a camera transfer after this long (ms)
    pub retrieval_timeout_ms: u32,
    /// Pause between camera link polls (µs)
    pub retrieval_poll_us: u32,
    /// Image receive buffer size (bytes)
    pub image_buffer_size: usize,
    /// Pause after each image chunk notification (ms)
    pub chunk_delay_ms: u32,
    /// Pause after the image start marker (ms)
    pub marker_delay_ms: u32,
    /// Minimum interval between periodic display refreshes (ms)
    pub display_refresh_ms: u32,
    /// Pause before advertising again after a disconnect (ms)
    pub readvertise_delay_ms: u32,
}

impl ClockConfig {
    /// Default configuration, usable in const context
    pub const fn new() -> Self {
        Self {
            initial_time_ms: DEFAULT_INITIAL_TIME_MS,
            debounce_ms: 50,
            retrieval_timeout_ms: 5000,
            retrieval_poll_us: 1000,
            image_buffer_size: DEFAULT_IMAGE_BUFFER_SIZE,
            chunk_delay_ms: 5,
            marker_delay_ms: 20,
            display_refresh_ms: 100,
            readvertise_delay_ms: 500,
        }
    }

    /// Check values the clock cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_time_ms == 0 {
            return Err(ConfigError::ZeroInitialTime);
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::DebounceTooLong);
        }
        if self.retrieval_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.retrieval_poll_us == 0 || self.retrieval_poll_us / 1000 >= self.retrieval_timeout_ms {
            return Err(ConfigError::PollInterval);
        }
        if self.image_buffer_size == 0 {
            return Err(ConfigError::ZeroImageBuffer);
        }
        if self.readvertise_delay_ms > self.retrieval_timeout_ms {
            return Err(ConfigError::ReadvertiseDelay);
        }
        Ok(())
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Players would start with no time
    ZeroInitialTime,
    /// Debounce window longer than [`MAX_DEBOUNCE_MS`]
    DebounceTooLong,
    /// Camera transfers could never succeed
    ZeroTimeout,
    /// Poll interval is zero or not shorter than the transfer timeout
    PollInterval,
    /// No room to receive an image
    ZeroImageBuffer,
    /// Re-advertising would block longer than a camera transfer
    ReadvertiseDelay,
}

impl ConfigError {
    /// Human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigError::ZeroInitialTime => "initial_time_ms must be greater than zero",
            ConfigError::DebounceTooLong => "debounce_ms must be at most 1000",
            ConfigError::ZeroTimeout => "retrieval_timeout_ms must be greater than zero",
            ConfigError::PollInterval => {
                "retrieval_poll_us must be non-zero and shorter than the timeout"
            }
            ConfigError::ZeroImageBuffer => "image_buffer_size must be greater than zero",
            ConfigError::ReadvertiseDelay => {
                "readvertise_delay_ms must not exceed retrieval_timeout_ms"
            }
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
