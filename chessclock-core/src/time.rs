//! Elapsed-time arithmetic on a wrapping millisecond counter

/// Milliseconds from `previous` to `current`
///
/// The counter wraps at `u32::MAX`. When `current` is below `previous` the
/// counter wrapped once, and the elapsed time is `(MAX - previous) + current + 1`.
pub const fn elapsed_ms(previous: u32, current: u32) -> u32 {
    if current < previous {
        (u32::MAX - previous) + current + 1
    } else {
        current - previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward() {
        assert_eq!(elapsed_ms(1000, 1250), 250);
        assert_eq!(elapsed_ms(5, 5), 0);
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(elapsed_ms(u32::MAX, 0), 1);
        assert_eq!(elapsed_ms(u32::MAX - 9, 10), 20);
        assert_eq!(elapsed_ms(1, 0), u32::MAX);
    }
}
