//! HD44780 character LCD on a PCF8574 I2C backpack
//!
//! The expander drives the LCD in 4-bit mode:
//!
//! ```text
//! P7 P6 P5 P4 | P3        | P2 | P1 | P0
//! D7 D6 D5 D4 | backlight | EN | RW | RS
//! ```
//!
//! Every byte goes out as two nibbles, each latched by pulsing EN.

use chessclock_core::clock::ClockSnapshot;
use chessclock_core::display::{ClockFace, FACE_COLUMNS};
use chessclock_core::traits::ClockDisplay;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::String;

/// Usual backpack address (A0-A2 open)
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Expander bit assignments
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// Instruction set
mod cmd {
    pub const CLEAR: u8 = 0x01;
    /// Increment cursor, no shift
    pub const ENTRY_MODE: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, two lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Last DDRAM column of a row
const LAST_COLUMN: u8 = 0x27;

/// 16x2 HD44780 display
pub struct Hd44780<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    /// Row text currently on the glass
    shown: [String<FACE_COLUMNS>; 2],
}

impl<I: I2c, D: DelayNs> Hd44780<I, D> {
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            shown: [String::new(), String::new()],
        }
    }

    /// Power-on initialisation into 4-bit mode
    pub fn init(&mut self) -> Result<(), I::Error> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;

        // Three 8-bit function sets, then switch to 4-bit
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, 0)?;

        self.command(cmd::FUNCTION_SET)?;
        self.command(cmd::DISPLAY_ON)?;
        self.command(cmd::ENTRY_MODE)?;
        self.clear()
    }

    /// Clear the screen and home the cursor
    pub fn clear(&mut self) -> Result<(), I::Error> {
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        for row in self.shown.iter_mut() {
            row.clear();
        }
        Ok(())
    }

    /// Move the cursor; rows past the second clamp to the last row and
    /// columns past the 40-byte line clamp to its end
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I::Error> {
        let offset = ROW_OFFSETS[usize::from(row).min(ROW_OFFSETS.len() - 1)];
        self.command(cmd::SET_DDRAM | ((offset + col.min(LAST_COLUMN)) & 0x7F))
    }

    /// Write text at the cursor; non-ASCII characters print as `?`
    pub fn write_str(&mut self, text: &str) -> Result<(), I::Error> {
        for c in text.chars() {
            let byte = if c.is_ascii() { c as u8 } else { b'?' };
            self.write_byte(byte, pin::RS)?;
        }
        Ok(())
    }

    fn write_row(&mut self, row: usize, text: &str) -> Result<(), I::Error> {
        self.set_cursor(0, row as u8)?;
        self.write_str(text)?;
        // Blank the rest so old indicators disappear
        for _ in text.len()..FACE_COLUMNS {
            self.write_byte(b' ', pin::RS)?;
        }
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<(), I::Error> {
        self.write_byte(value, 0)
    }

    fn write_byte(&mut self, value: u8, mode: u8) -> Result<(), I::Error> {
        self.write_nibble(value >> 4, mode)?;
        self.write_nibble(value & 0x0F, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), I::Error> {
        let bits = (nibble << 4) | mode;
        self.expander_write(bits | pin::EN)?;
        self.delay.delay_us(1);
        self.expander_write(bits)?;
        self.delay.delay_us(50);
        Ok(())
    }

    /// The backlight bit is kept on with every write
    fn expander_write(&mut self, bits: u8) -> Result<(), I::Error> {
        self.i2c.write(self.address, &[bits | pin::BACKLIGHT])
    }
}

impl<I: I2c, D: DelayNs> ClockDisplay for Hd44780<I, D> {
    type Error = I::Error;

    fn render(&mut self, snapshot: &ClockSnapshot, full_redraw: bool) -> Result<(), Self::Error> {
        let face = ClockFace::new(snapshot);
        for (row, text) in face.rows.iter().enumerate() {
            if full_redraw || self.shown[row] != *text {
                self.write_row(row, text)?;
                self.shown[row] = text.clone();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::convert::Infallible;
    use std::vec::Vec;

    use chessclock_core::state::State;
    use embedded_hal::i2c::{ErrorType, Operation};

    use super::*;

    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<(u8, u8)>,
    }

    impl ErrorType for RecordingBus {
        type Error = Infallible;
    }

    impl I2c for RecordingBus {
        fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Infallible> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.extend(bytes.iter().map(|b| (address, *b)));
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[derive(Debug, PartialEq)]
    enum Lcd {
        Command(u8),
        Data(u8),
    }

    /// Reassemble bytes from EN-high nibble writes
    fn decode(writes: &[(u8, u8)]) -> Vec<Lcd> {
        let latched: Vec<u8> = writes
            .iter()
            .map(|(_, bits)| *bits)
            .filter(|bits| bits & pin::EN != 0)
            .collect();
        latched
            .chunks(2)
            .map(|pair| {
                let value = (pair[0] & 0xF0) | (pair[1] >> 4);
                if pair[0] & pin::RS != 0 {
                    Lcd::Data(value)
                } else {
                    Lcd::Command(value)
                }
            })
            .collect()
    }

    fn text(ops: &[Lcd]) -> std::string::String {
        ops.iter()
            .filter_map(|op| match op {
                Lcd::Data(b) => Some(*b as char),
                Lcd::Command(_) => None,
            })
            .collect()
    }

    fn snapshot(state: State, p1: u32, p2: u32) -> ClockSnapshot {
        ClockSnapshot {
            state,
            p1_remaining_ms: p1,
            p2_remaining_ms: p2,
        }
    }

    fn display() -> Hd44780<RecordingBus, NoDelay> {
        let mut lcd = Hd44780::new(RecordingBus::default(), NoDelay, DEFAULT_ADDRESS);
        lcd.init().unwrap();
        lcd.i2c.writes.clear();
        lcd
    }

    #[test]
    fn test_init_ends_with_clear() {
        let mut lcd = Hd44780::new(RecordingBus::default(), NoDelay, DEFAULT_ADDRESS);
        lcd.init().unwrap();

        assert!(lcd.i2c.writes.iter().all(|(address, bits)| {
            *address == DEFAULT_ADDRESS && bits & pin::BACKLIGHT != 0
        }));
        // Skip the expander reset and the four bare init nibbles (two writes each)
        let ops = decode(&lcd.i2c.writes[9..]);
        assert_eq!(
            ops,
            [
                Lcd::Command(cmd::FUNCTION_SET),
                Lcd::Command(cmd::DISPLAY_ON),
                Lcd::Command(cmd::ENTRY_MODE),
                Lcd::Command(cmd::CLEAR),
            ]
        );
    }

    #[test]
    fn test_full_render() {
        let mut lcd = display();
        lcd.render(&snapshot(State::Idle, 540_000, 540_000), true).unwrap();

        let ops = decode(&lcd.i2c.writes);
        assert_eq!(ops[0], Lcd::Command(0x80));
        assert_eq!(ops[17], Lcd::Command(0xC0));
        assert_eq!(text(&ops), "P1:09:00.0  IDLEP2:09:00.0      ");
    }

    #[test]
    fn test_partial_render_skips_unchanged_rows() {
        let mut lcd = display();
        lcd.render(&snapshot(State::RunningP2, 540_000, 540_000), true).unwrap();
        lcd.i2c.writes.clear();

        lcd.render(&snapshot(State::RunningP2, 540_000, 539_900), false).unwrap();
        let ops = decode(&lcd.i2c.writes);
        assert_eq!(ops[0], Lcd::Command(0xC0));
        assert_eq!(text(&ops), "P2:08:59.9  <-- ");

        lcd.i2c.writes.clear();
        lcd.render(&snapshot(State::RunningP2, 540_000, 539_900), false).unwrap();
        assert!(lcd.i2c.writes.is_empty());
    }

    #[test]
    fn test_set_cursor_clamps_column() {
        let mut lcd = display();
        lcd.set_cursor(3, 1).unwrap();
        lcd.set_cursor(0xC0, 1).unwrap();
        lcd.set_cursor(u8::MAX, 0).unwrap();
        lcd.set_cursor(0, 5).unwrap();

        assert_eq!(
            decode(&lcd.i2c.writes),
            [
                Lcd::Command(0xC3),
                Lcd::Command(0xE7),
                Lcd::Command(0xA7),
                Lcd::Command(0xC0),
            ]
        );
    }
}
