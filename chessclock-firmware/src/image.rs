//! Image buffer allocation

use alloc::vec::Vec;
use defmt::*;

/// Allocate the buffer camera images are received into
///
/// Returns `None` when the heap cannot hold it. The clock then runs without
/// images: moves are still published, just never followed by a picture.
pub fn allocate(size: usize) -> Option<&'static mut [u8]> {
    let mut buffer: Vec<u8> = Vec::new();
    if buffer.try_reserve_exact(size).is_err() {
        warn!("Cannot allocate {} byte image buffer, images disabled", size);
        return None;
    }
    buffer.resize(size, 0);
    info!("Image buffer: {} bytes", size);
    Some(buffer.leak())
}
