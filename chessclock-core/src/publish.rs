//! Status and image publishing
//!
//! Everything the companion app receives goes through [`StatusPublisher`].
//! Delivery is fire-and-forget: when nobody is connected the message is
//! dropped, and a transfer interrupted by a disconnect is abandoned rather
//! than resumed.

use chessclock_hal::NotifyChannel;
use chessclock_protocol::fragment::image_start_marker;
use chessclock_protocol::{Fragment, Fragments, StatusMessage, IMAGE_END_MARKER};
use embedded_hal::delay::DelayNs;

use crate::config::ClockConfig;
use crate::log::{debug, info, warn};

/// Result of one publish call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishOutcome {
    /// Every message was handed to the channel
    Sent,
    /// Nobody connected; nothing sent
    NotConnected,
    /// Nothing to send (empty image or unencodable status)
    Rejected,
    /// Stopped after `sent` messages because the link went away
    Truncated { sent: usize },
}

/// Pacing between image notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishPacing {
    /// Pause after the start marker (ms)
    pub marker_delay_ms: u32,
    /// Pause after each chunk (ms)
    pub chunk_delay_ms: u32,
}

impl From<&ClockConfig> for PublishPacing {
    fn from(config: &ClockConfig) -> Self {
        Self {
            marker_delay_ms: config.marker_delay_ms,
            chunk_delay_ms: config.chunk_delay_ms,
        }
    }
}

/// Pushes status updates and images to the notification channel
pub struct StatusPublisher<N> {
    channel: N,
    pacing: PublishPacing,
}

impl<N: NotifyChannel> StatusPublisher<N> {
    pub fn new(channel: N, pacing: PublishPacing) -> Self {
        Self { channel, pacing }
    }

    /// Underlying channel
    pub fn channel(&self) -> &N {
        &self.channel
    }

    /// Underlying channel, mutably
    pub fn channel_mut(&mut self) -> &mut N {
        &mut self.channel
    }

    /// Send one status update
    ///
    /// The attempt is logged whether or not anyone is listening.
    pub fn publish(&mut self, status: &StatusMessage) -> PublishOutcome {
        info!(
            "status: moved={} p1={}s p2={}s",
            status.moved_player,
            status.p1_time_sec,
            status.p2_time_sec
        );

        if !self.channel.is_connected() {
            debug!("status not sent, no client connected");
            return PublishOutcome::NotConnected;
        }

        let Ok(json) = status.to_json() else {
            warn!("status message does not fit");
            return PublishOutcome::Rejected;
        };

        match self.channel.notify(json.as_bytes()) {
            Ok(()) => PublishOutcome::Sent,
            Err(_) => {
                warn!("status notify failed");
                PublishOutcome::Truncated { sent: 0 }
            }
        }
    }

    /// Send an image as start marker, 20-byte chunks and end marker
    ///
    /// Blocks for the pacing delays between messages. The connection is
    /// checked before every message; a disconnect ends the transfer early.
    pub fn publish_image<D: DelayNs>(&mut self, image: &[u8], delay: &mut D) -> PublishOutcome {
        if !self.channel.is_connected() {
            debug!("image not sent, no client connected");
            return PublishOutcome::NotConnected;
        }
        if image.is_empty() {
            warn!("refusing to send empty image");
            return PublishOutcome::Rejected;
        }

        let fragments = Fragments::new(image);
        let total = fragments.message_count();
        info!("sending {} byte image in {} messages", image.len(), total);

        for (sent, fragment) in fragments.enumerate() {
            if !self.channel.is_connected() {
                warn!("client left after {}/{} image messages", sent, total);
                return PublishOutcome::Truncated { sent };
            }

            let (result, pause_ms) = match fragment {
                Fragment::Start { size } => match image_start_marker(size) {
                    Ok(marker) => (
                        self.channel.notify(marker.as_bytes()),
                        self.pacing.marker_delay_ms,
                    ),
                    Err(_) => return PublishOutcome::Rejected,
                },
                Fragment::Chunk(chunk) => (self.channel.notify(chunk), self.pacing.chunk_delay_ms),
                Fragment::End => (self.channel.notify(IMAGE_END_MARKER.as_bytes()), 0),
            };

            if result.is_err() {
                warn!("image notify failed after {}/{} messages", sent, total);
                return PublishOutcome::Truncated { sent };
            }
            if pause_ms > 0 {
                delay.delay_ms(pause_ms);
            }
        }

        info!("image sent");
        PublishOutcome::Sent
    }
}
