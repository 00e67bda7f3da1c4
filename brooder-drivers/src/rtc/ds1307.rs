//! DS1307 real-time clock
//!
//! Battery-backed I2C RTC. Time is kept as BCD in registers 0x00-0x06:
//!
//! | Reg  | Content                                  |
//! |------|------------------------------------------|
//! | 0x00 | CH (bit 7), seconds 00-59                |
//! | 0x01 | minutes 00-59                            |
//! | 0x02 | 12/24 (bit 6), PM (bit 5), hours         |
//! | 0x03 | day of week 1-7                          |
//! | 0x04 | date 01-31                               |
//! | 0x05 | month 01-12                              |
//! | 0x06 | year 00-99                               |
//!
//! The clock halt (CH) bit is set on a fresh chip; the oscillator does
//! not run until the time has been written once.

use brooder_core::traits::{Clock, ClockError, WallTime};
use brooder_hal::I2cBus;

/// Fixed 7-bit bus address
pub const DEFAULT_ADDRESS: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const CLOCK_HALT: u8 = 0x80;
const HOUR_12H: u8 = 0x40;
const HOUR_PM: u8 = 0x20;
const CENTURY: u16 = 2000;

/// DS1307 driver
pub struct Ds1307<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> Ds1307<B> {
    /// Create a driver at the default address
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, DEFAULT_ADDRESS)
    }

    /// Create a driver at a specific address
    pub fn with_address(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Check if the oscillator is stopped
    pub fn is_halted(&mut self) -> Result<bool, ClockError> {
        let mut buf = [0u8; 1];
        self.bus
            .write_read(self.address, &[REG_SECONDS], &mut buf)
            .map_err(|_| ClockError::Bus)?;
        Ok(buf[0] & CLOCK_HALT != 0)
    }

    /// Set the time and start the oscillator
    ///
    /// Hours are always written in 24-hour mode.
    pub fn set_time(&mut self, time: &WallTime) -> Result<(), ClockError> {
        if !valid(time) {
            return Err(ClockError::InvalidData);
        }
        let year = (time.year - CENTURY) as u8;
        let frame = [
            REG_SECONDS,
            to_bcd(time.second),
            to_bcd(time.minute),
            to_bcd(time.hour),
            1,
            to_bcd(time.day),
            to_bcd(time.month),
            to_bcd(year),
        ];
        self.bus
            .write(self.address, &frame)
            .map_err(|_| ClockError::Bus)
    }

    /// Start a halted clock at `fallback`
    ///
    /// Returns `true` when the clock had to be set. A running clock is left
    /// untouched.
    pub fn start_if_halted(&mut self, fallback: &WallTime) -> Result<bool, ClockError> {
        if !self.is_halted()? {
            return Ok(false);
        }
        self.set_time(fallback)?;
        Ok(true)
    }
}

impl<B: I2cBus> Clock for Ds1307<B> {
    fn now(&mut self) -> Result<WallTime, ClockError> {
        let mut regs = [0u8; 7];
        self.bus
            .write_read(self.address, &[REG_SECONDS], &mut regs)
            .map_err(|_| ClockError::Bus)?;
        decode(&regs)
    }
}

/// Decode the seven time registers
pub fn decode(regs: &[u8; 7]) -> Result<WallTime, ClockError> {
    if regs[0] & CLOCK_HALT != 0 {
        return Err(ClockError::Halted);
    }

    let hour = if regs[2] & HOUR_12H != 0 {
        let h12 = from_bcd(regs[2] & 0x1F)?;
        if !(1..=12).contains(&h12) {
            return Err(ClockError::InvalidData);
        }
        let pm = regs[2] & HOUR_PM != 0;
        match (h12, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        }
    } else {
        from_bcd(regs[2] & 0x3F)?
    };

    let time = WallTime {
        year: CENTURY + from_bcd(regs[6])? as u16,
        month: from_bcd(regs[5] & 0x1F)?,
        day: from_bcd(regs[4] & 0x3F)?,
        hour,
        minute: from_bcd(regs[1] & 0x7F)?,
        second: from_bcd(regs[0] & 0x7F)?,
    };

    if valid(&time) {
        Ok(time)
    } else {
        Err(ClockError::InvalidData)
    }
}

fn valid(time: &WallTime) -> bool {
    (CENTURY..CENTURY + 100).contains(&time.year)
        && (1..=12).contains(&time.month)
        && (1..=31).contains(&time.day)
        && time.hour < 24
        && time.minute < 60
        && time.second < 60
}

fn from_bcd(value: u8) -> Result<u8, ClockError> {
    let (tens, units) = (value >> 4, value & 0x0F);
    if tens > 9 || units > 9 {
        return Err(ClockError::InvalidData);
    }
    Ok(tens * 10 + units)
}

fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
