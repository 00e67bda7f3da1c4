//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by chip-specific HALs.

use core::cell::RefCell;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices (RTC, LCD backpack).
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// A handle onto an I2C bus shared by several drivers
///
/// The RTC and the LCD backpack sit on the same bus. Each driver owns a
/// `SharedBus` handle; the single-threaded control loop never holds two
/// borrows at once.
pub struct SharedBus<'a, B> {
    bus: &'a RefCell<B>,
}

impl<'a, B> SharedBus<'a, B> {
    /// Create a handle onto a bus cell
    pub fn new(bus: &'a RefCell<B>) -> Self {
        Self { bus }
    }
}

impl<'a, B> Clone for SharedBus<'a, B> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<B: I2cBus> I2cBus for SharedBus<'_, B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write_read(address, write_data, read_buf)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode, DS1307 maximum
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingBus {
        writes: usize,
    }

    impl I2cBus for CountingBus {
        type Error = ();

        fn write(&mut self, _address: u8, _data: &[u8]) -> Result<(), ()> {
            self.writes += 1;
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), ()> {
            Ok(())
        }

        fn write_read(&mut self, _address: u8, _w: &[u8], _r: &mut [u8]) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_shared_bus_handles_reach_same_bus() {
        let cell = RefCell::new(CountingBus::default());
        let mut a = SharedBus::new(&cell);
        let mut b = a.clone();

        a.write(0x27, &[0]).unwrap();
        b.write(0x68, &[0]).unwrap();

        assert_eq!(cell.borrow().writes, 2);
    }
}
