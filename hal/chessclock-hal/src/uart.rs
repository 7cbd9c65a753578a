//! UART link configuration
//!
//! The host controller and the camera peripheral agree on these settings out
//! of band. Both firmwares build their UART from [`UartConfig::default`].

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Approximate transfer time for `bytes` bytes, in milliseconds
    ///
    /// Counts start and stop bits, rounds up. Useful for sizing timeouts.
    pub fn transfer_time_ms(&self, bytes: u32) -> u32 {
        let bits_per_byte = 1 + self.data_bits.count() + self.parity.count() + self.stop_bits.count();
        let total_bits = bytes as u64 * bits_per_byte as u64 * 1000;
        total_bits.div_ceil(self.baudrate.max(1) as u64) as u32
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

impl DataBits {
    fn count(self) -> u32 {
        match self {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

impl Parity {
    fn count(self) -> u32 {
        match self {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        }
    }
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

impl StopBits {
    fn count(self) -> u32 {
        match self {
            StopBits::One => 1,
            StopBits::Two => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_115200_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 115200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    #[test]
    fn test_transfer_time() {
        let config = UartConfig::default();
        // 30 KiB at 10 bits per byte and 115200 baud is ~2.67 s
        assert_eq!(config.transfer_time_ms(30 * 1024), 2667);
        assert_eq!(config.transfer_time_ms(0), 0);
        // One byte rounds up to a whole millisecond
        assert_eq!(config.transfer_time_ms(1), 1);
    }
}
