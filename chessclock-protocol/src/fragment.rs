//! Image fragmentation for the notification channel
//!
//! A notification carries at most [`IMAGE_CHUNK_SIZE`] bytes, so an image is
//! pushed as:
//!
//! 1. start marker `{"type":"image_start","size":N}`
//! 2. `ceil(N / 20)` raw chunks, all 20 bytes except possibly the last
//! 3. end marker `{"type":"image_end"}`
//!
//! The receiver reassembles by concatenating chunks between the markers.

use core::fmt::Write;

use heapless::String;

/// Raw bytes per image notification
pub const IMAGE_CHUNK_SIZE: usize = 20;

/// Longest encoded start marker
pub const MAX_MARKER_LEN: usize = 48;

/// End-of-image marker
pub const IMAGE_END_MARKER: &str = "{\"type\":\"image_end\"}";

/// One notification of an image transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fragment<'a> {
    /// Start marker declaring the total size
    Start { size: usize },
    /// Raw image bytes
    Chunk(&'a [u8]),
    /// End marker
    End,
}

/// Encode the start marker for an image of `size` bytes
pub fn image_start_marker(size: usize) -> Result<String<MAX_MARKER_LEN>, core::fmt::Error> {
    let mut out = String::new();
    write!(out, "{{\"type\":\"image_start\",\"size\":{}}}", size)?;
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Chunks,
    End,
    Done,
}

/// Iterator over the notifications for one image
#[derive(Debug, Clone)]
pub struct Fragments<'a> {
    image: &'a [u8],
    chunk_size: usize,
    offset: usize,
    stage: Stage,
}

impl<'a> Fragments<'a> {
    /// Fragment `image` into [`IMAGE_CHUNK_SIZE`] chunks
    pub fn new(image: &'a [u8]) -> Self {
        Self::with_chunk_size(image, IMAGE_CHUNK_SIZE)
    }

    /// Fragment with a different chunk size (e.g. after an MTU exchange)
    ///
    /// A chunk size of 0 is treated as 1.
    pub fn with_chunk_size(image: &'a [u8], chunk_size: usize) -> Self {
        Self {
            image,
            chunk_size: chunk_size.max(1),
            offset: 0,
            stage: Stage::Start,
        }
    }

    /// Total number of messages this image produces (markers included)
    pub fn message_count(&self) -> usize {
        self.image.len().div_ceil(self.chunk_size) + 2
    }
}

impl<'a> Iterator for Fragments<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stage {
                Stage::Start => {
                    self.stage = Stage::Chunks;
                    return Some(Fragment::Start {
                        size: self.image.len(),
                    });
                }
                Stage::Chunks => {
                    if self.offset < self.image.len() {
                        let end = (self.offset + self.chunk_size).min(self.image.len());
                        let chunk = &self.image[self.offset..end];
                        self.offset = end;
                        return Some(Fragment::Chunk(chunk));
                    }
                    self.stage = Stage::End;
                }
                Stage::End => {
                    self.stage = Stage::Done;
                    return Some(Fragment::End);
                }
                Stage::Done => return None,
            }
        }
    }
}
