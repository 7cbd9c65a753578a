//! ArduChip SPI frame buffer camera
//!
//! The ArduChip latches one JPEG frame from the sensor into its FIFO and
//! exposes it over SPI. Register writes set bit 7 of the address byte.
//!
//! Sensor register setup (JPEG mode, resolution) happens over the sensor's
//! own SCCB bus before frames are requested and is not handled here.

use chessclock_core::traits::{CaptureError, ImageSource};
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{Operation, SpiDevice};

use super::jpeg::trim_frame;

/// ArduChip register addresses
pub mod reg {
    /// Scratch register for bus checks
    pub const TEST: u8 = 0x00;
    /// FIFO control
    pub const FIFO_CONTROL: u8 = 0x04;
    /// Burst FIFO read
    pub const BURST_FIFO_READ: u8 = 0x3C;
    /// Status flags
    pub const TRIGGER: u8 = 0x41;
    /// FIFO length, bits 7:0
    pub const FIFO_SIZE1: u8 = 0x42;
    /// FIFO length, bits 15:8
    pub const FIFO_SIZE2: u8 = 0x43;
    /// FIFO length, bits 22:16
    pub const FIFO_SIZE3: u8 = 0x44;
}

const WRITE_FLAG: u8 = 0x80;
const FIFO_CLEAR: u8 = 0x01;
const FIFO_START: u8 = 0x02;
const CAPTURE_DONE: u8 = 0x08;
const TEST_PATTERN: u8 = 0x55;

/// Largest frame the FIFO can hold
pub const MAX_FIFO_SIZE: usize = 0x5FFFF;

/// Capture timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArducamConfig {
    /// Give up waiting for the capture-done flag after this long (ms)
    pub capture_timeout_ms: u32,
    /// Pause between status polls (µs)
    pub poll_interval_us: u32,
}

impl Default for ArducamConfig {
    fn default() -> Self {
        Self {
            capture_timeout_ms: 2000,
            poll_interval_us: 1000,
        }
    }
}

/// ArduChip camera on an SPI bus
pub struct Arducam<S, D> {
    spi: S,
    delay: D,
    config: ArducamConfig,
}

impl<S: SpiDevice, D: DelayNs> Arducam<S, D> {
    pub fn new(spi: S, delay: D, config: ArducamConfig) -> Self {
        Self { spi, delay, config }
    }

    /// Check that the chip answers on the bus
    pub fn probe(&mut self) -> Result<(), CaptureError> {
        self.write_reg(reg::TEST, TEST_PATTERN)?;
        if self.read_reg(reg::TEST)? != TEST_PATTERN {
            return Err(CaptureError::Bus);
        }
        Ok(())
    }

    /// Bytes waiting in the FIFO
    pub fn fifo_length(&mut self) -> Result<usize, CaptureError> {
        let low = self.read_reg(reg::FIFO_SIZE1)? as usize;
        let mid = self.read_reg(reg::FIFO_SIZE2)? as usize;
        let high = (self.read_reg(reg::FIFO_SIZE3)? & 0x7F) as usize;
        Ok((high << 16) | (mid << 8) | low)
    }

    fn start_capture(&mut self) -> Result<(), CaptureError> {
        self.write_reg(reg::FIFO_CONTROL, FIFO_CLEAR)?;
        self.write_reg(reg::FIFO_CONTROL, FIFO_START)
    }

    fn wait_capture_done(&mut self) -> Result<(), CaptureError> {
        let interval_us = self.config.poll_interval_us.max(1);
        let polls = (u64::from(self.config.capture_timeout_ms) * 1000 / u64::from(interval_us)).max(1);
        for _ in 0..polls {
            if self.read_reg(reg::TRIGGER)? & CAPTURE_DONE != 0 {
                return Ok(());
            }
            self.delay.delay_us(interval_us);
        }
        Err(CaptureError::Timeout)
    }

    fn read_fifo(&mut self, buffer: &mut [u8]) -> Result<(), CaptureError> {
        self.spi
            .transaction(&mut [
                Operation::Write(&[reg::BURST_FIFO_READ]),
                Operation::Read(buffer),
            ])
            .map_err(|_| CaptureError::Bus)
    }

    fn write_reg(&mut self, address: u8, value: u8) -> Result<(), CaptureError> {
        self.spi
            .write(&[address | WRITE_FLAG, value])
            .map_err(|_| CaptureError::Bus)
    }

    fn read_reg(&mut self, address: u8) -> Result<u8, CaptureError> {
        let mut value = [0u8; 1];
        self.spi
            .transaction(&mut [
                Operation::Write(&[address & !WRITE_FLAG]),
                Operation::Read(&mut value),
            ])
            .map_err(|_| CaptureError::Bus)?;
        Ok(value[0])
    }
}

impl<S: SpiDevice, D: DelayNs> ImageSource for Arducam<S, D> {
    fn capture_frame(&mut self, buffer: &mut [u8]) -> Result<usize, CaptureError> {
        self.start_capture()?;
        self.wait_capture_done()?;

        let length = self.fifo_length()?;
        if length == 0 {
            return Err(CaptureError::CaptureFail);
        }
        if length > MAX_FIFO_SIZE || length > buffer.len() {
            self.write_reg(reg::FIFO_CONTROL, FIFO_CLEAR)?;
            return Err(CaptureError::FrameTooLarge);
        }

        self.read_fifo(&mut buffer[..length])?;
        self.write_reg(reg::FIFO_CONTROL, FIFO_CLEAR)?;

        trim_frame(&mut buffer[..length]).ok_or(CaptureError::CaptureFail)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::convert::Infallible;
    use std::vec::Vec;

    use embedded_hal::spi::ErrorType;

    use super::*;

    /// Register-level model of the ArduChip
    #[derive(Default)]
    struct FakeChip {
        test: u8,
        /// Status polls before the done flag appears
        polls_until_done: usize,
        capturing: bool,
        fifo: Vec<u8>,
        register_writes: Vec<(u8, u8)>,
    }

    impl FakeChip {
        fn with_frame(frame: &[u8], polls_until_done: usize) -> Self {
            Self {
                polls_until_done,
                fifo: frame.to_vec(),
                ..Self::default()
            }
        }

        fn read(&mut self, address: u8) -> u8 {
            let len = self.fifo.len();
            match address {
                reg::TEST => self.test,
                reg::TRIGGER if self.capturing && self.polls_until_done == 0 => CAPTURE_DONE,
                reg::TRIGGER => {
                    self.polls_until_done = self.polls_until_done.saturating_sub(1);
                    0
                }
                reg::FIFO_SIZE1 => len as u8,
                reg::FIFO_SIZE2 => (len >> 8) as u8,
                reg::FIFO_SIZE3 => (len >> 16) as u8,
                _ => 0,
            }
        }
    }

    impl ErrorType for FakeChip {
        type Error = Infallible;
    }

    impl SpiDevice for FakeChip {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            let mut address = None;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) if bytes.len() == 2 => {
                        let (register, value) = (bytes[0] & !WRITE_FLAG, bytes[1]);
                        self.register_writes.push((register, value));
                        match (register, value) {
                            (reg::TEST, value) => self.test = value,
                            (reg::FIFO_CONTROL, FIFO_START) => self.capturing = true,
                            _ => {}
                        }
                    }
                    Operation::Write(bytes) => address = bytes.first().copied(),
                    Operation::Read(buf) => match address {
                        Some(reg::BURST_FIFO_READ) => {
                            let n = buf.len().min(self.fifo.len());
                            buf[..n].copy_from_slice(&self.fifo[..n]);
                        }
                        Some(register) => {
                            let value = self.read(register);
                            buf.fill(value);
                        }
                        None => {}
                    },
                    _ => {}
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn camera(chip: FakeChip) -> Arducam<FakeChip, NoDelay> {
        Arducam::new(chip, NoDelay, ArducamConfig::default())
    }

    #[test]
    fn test_probe() {
        let mut cam = camera(FakeChip::default());
        assert_eq!(cam.probe(), Ok(()));
    }

    #[test]
    fn test_captures_and_trims_frame() {
        let frame = [0x00, 0xFF, 0xD8, 0x10, 0x20, 0xFF, 0xD9, 0x00];
        let mut cam = camera(FakeChip::with_frame(&frame, 3));
        let mut buffer = [0u8; 32];

        let size = cam.capture_frame(&mut buffer).unwrap();
        assert_eq!(&buffer[..size], &[0xFF, 0xD8, 0x10, 0x20, 0xFF, 0xD9]);
        assert_eq!(
            cam.spi.register_writes,
            [
                (reg::FIFO_CONTROL, FIFO_CLEAR),
                (reg::FIFO_CONTROL, FIFO_START),
                (reg::FIFO_CONTROL, FIFO_CLEAR),
            ]
        );
    }

    #[test]
    fn test_empty_fifo_is_capture_failure() {
        let mut cam = camera(FakeChip::with_frame(&[], 0));
        let mut buffer = [0u8; 32];
        assert_eq!(cam.capture_frame(&mut buffer), Err(CaptureError::CaptureFail));
    }

    #[test]
    fn test_frame_larger_than_buffer() {
        let mut cam = camera(FakeChip::with_frame(&[0xAA; 64], 0));
        let mut buffer = [0u8; 32];
        assert_eq!(cam.capture_frame(&mut buffer), Err(CaptureError::FrameTooLarge));
    }

    #[test]
    fn test_done_flag_never_set() {
        let mut cam = Arducam::new(
            FakeChip::with_frame(&[0xFF, 0xD8, 0xFF, 0xD9], usize::MAX),
            NoDelay,
            ArducamConfig {
                capture_timeout_ms: 5,
                poll_interval_us: 1000,
            },
        );
        let mut buffer = [0u8; 32];
        assert_eq!(cam.capture_frame(&mut buffer), Err(CaptureError::Timeout));
    }

    #[test]
    fn test_not_a_jpeg() {
        let mut cam = camera(FakeChip::with_frame(&[1, 2, 3, 4], 0));
        let mut buffer = [0u8; 32];
        assert_eq!(cam.capture_frame(&mut buffer), Err(CaptureError::CaptureFail));
    }

    #[test]
    fn test_fifo_length_assembly() {
        let mut cam = camera(FakeChip::with_frame(&[0u8; 0x1_2345], 0));
        assert_eq!(cam.fifo_length(), Ok(0x1_2345));
    }
}
