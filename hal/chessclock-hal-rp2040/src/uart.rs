//! UART configuration
//!
//! RP2040 has two UART peripherals (UART0 and UART1). The host controller
//! uses one for the camera link and the other for the BLE bridge; the camera
//! firmware uses UART0 for the host link.

use chessclock_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use embassy_rp::uart;

/// Build the embassy UART config for a link configuration
pub fn embassy_config(link: &UartConfig) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = link.baudrate;
    config.data_bits = match link.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match link.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    config.stop_bits = match link.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    config
}
