//! HD44780 16x2 character LCD on a PCF8574 I2C backpack
//!
//! The backpack maps its eight outputs onto the LCD in 4-bit mode:
//!
//! | PCF8574 | P7 | P6 | P5 | P4 | P3        | P2 | P1 | P0 |
//! |---------|----|----|----|----|-----------|----|----|----|
//! | LCD     | D7 | D6 | D5 | D4 | backlight | EN | RW | RS |
//!
//! Each byte goes out as two nibbles, high first, each latched by an EN
//! pulse. RW is tied to write; the busy flag is never read, so every
//! command is followed by its worst-case execution delay instead.

use brooder_core::traits::{Display, DisplayError, DISPLAY_COLS, DISPLAY_ROWS};
use brooder_hal::I2cBus;
use embedded_hal::delay::DelayNs;

/// Common backpack address (PCF8574; PCF8574A boards use 0x3F)
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

const ENTRY_INCREMENT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const FUNCTION_TWO_LINES: u8 = 0x08;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; DISPLAY_ROWS] = [0x00, 0x40];

/// HD44780 driver
pub struct Hd44780<B, D> {
    bus: B,
    delay: D,
    address: u8,
}

impl<B: I2cBus, D: DelayNs> Hd44780<B, D> {
    /// Create a driver; call [`init`](Self::init) before use
    pub fn new(bus: B, delay: D, address: u8) -> Self {
        Self {
            bus,
            delay,
            address,
        }
    }

    /// Run the power-on initialisation sequence
    ///
    /// Forces the controller into 4-bit mode from any state, then sets
    /// two lines, display on with the cursor hidden, and left-to-right entry.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;

        // Three 8-bit function sets, then switch to 4-bit
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, 0)?;

        self.command(CMD_FUNCTION_SET | FUNCTION_TWO_LINES)?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_INCREMENT)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.send(cmd, 0)
    }

    fn send(&mut self, byte: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(byte & 0xF0, mode)?;
        self.write_nibble(byte << 4, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), DisplayError> {
        self.expander_write(nibble | mode | EN)?;
        self.delay.delay_us(1);
        self.expander_write(nibble | mode)?;
        self.delay.delay_us(50);
        Ok(())
    }

    // The backlight bit rides along with every expander write
    fn expander_write(&mut self, data: u8) -> Result<(), DisplayError> {
        self.bus
            .write(self.address, &[data | BACKLIGHT])
            .map_err(|_| DisplayError::Bus)
    }
}

impl<B: I2cBus, D: DelayNs> Display for Hd44780<B, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col as usize >= DISPLAY_COLS || row as usize >= DISPLAY_ROWS {
            return Err(DisplayError::InvalidPosition);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for c in text.chars() {
            // The character ROM only matches ASCII
            let byte = if c.is_ascii() { c as u8 } else { b'?' };
            self.send(byte, RS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Records every byte written to the expander
    #[derive(Default)]
    struct MockBus {
        writes: Vec<u8, 1024>,
        fail: bool,
    }

    impl I2cBus for MockBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail || address != DEFAULT_ADDRESS {
                return Err(());
            }
            for b in data {
                self.writes.push(*b).map_err(|_| ())?;
            }
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), ()> {
            Err(())
        }

        fn write_read(&mut self, _address: u8, _w: &[u8], _r: &mut [u8]) -> Result<(), ()> {
            Err(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Reassemble (byte, is_data) pairs from latched nibbles
    fn decode(writes: &[u8]) -> Vec<(u8, bool), 128> {
        let mut out = Vec::new();
        let mut latched = writes.iter().filter(|b| *b & EN != 0);
        while let (Some(hi), Some(lo)) = (latched.next(), latched.next()) {
            let _ = out.push(((hi & 0xF0) | (lo >> 4), hi & RS != 0));
        }
        out
    }

    fn lcd() -> Hd44780<MockBus, NoDelay> {
        let mut lcd = Hd44780::new(MockBus::default(), NoDelay, DEFAULT_ADDRESS);
        lcd.init().unwrap();
        lcd.bus.writes.clear();
        lcd
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = Hd44780::new(MockBus::default(), NoDelay, DEFAULT_ADDRESS);
        lcd.init().unwrap();
        let bus = &lcd.bus;

        let latched: Vec<u8, 64> = bus.writes.iter().copied().filter(|b| b & EN != 0).collect();
        // Four single nibbles to enter 4-bit mode
        assert_eq!(latched[0] & 0xF0, 0x30);
        assert_eq!(latched[1] & 0xF0, 0x30);
        assert_eq!(latched[2] & 0xF0, 0x30);
        assert_eq!(latched[3] & 0xF0, 0x20);

        let commands = decode(&latched[4..]);
        assert_eq!(
            commands.as_slice(),
            &[(0x28, false), (0x0C, false), (0x01, false), (0x06, false)]
        );
        assert!(bus.writes.iter().all(|b| b & BACKLIGHT != 0));
    }

    #[test]
    fn test_set_cursor_addresses() {
        let mut lcd = lcd();
        lcd.set_cursor(0, 0).unwrap();
        lcd.set_cursor(9, 1).unwrap();
        lcd.set_cursor(15, 1).unwrap();
        assert_eq!(
            decode(&lcd.bus.writes).as_slice(),
            &[(0x80, false), (0xC9, false), (0xCF, false)]
        );
    }

    #[test]
    fn test_set_cursor_out_of_grid() {
        let mut lcd = lcd();
        assert_eq!(lcd.set_cursor(16, 0), Err(DisplayError::InvalidPosition));
        assert_eq!(lcd.set_cursor(0, 2), Err(DisplayError::InvalidPosition));
        assert!(lcd.bus.writes.is_empty());
    }

    #[test]
    fn test_print_sends_data() {
        let mut lcd = lcd();
        lcd.print("Hi°").unwrap();
        assert_eq!(
            decode(&lcd.bus.writes).as_slice(),
            &[(b'H', true), (b'i', true), (b'?', true)]
        );
    }

    #[test]
    fn test_bus_error() {
        let mut lcd = lcd();
        lcd.bus.fail = true;
        assert_eq!(lcd.clear(), Err(DisplayError::Bus));
    }
}
