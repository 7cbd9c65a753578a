//! Monotonic time source
//!
//! The chess clock only ever needs millisecond resolution. The counter is
//! 32 bits wide and wraps after roughly 49.7 days; consumers must compute
//! differences with wraparound in mind.

/// Millisecond time source that only moves forward (modulo wraparound)
pub trait Monotonic {
    /// Current time in milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
