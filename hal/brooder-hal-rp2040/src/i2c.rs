//! Blocking I2C master
//!
//! The RTC and LCD are polled from the control loop, so the blocking
//! driver is enough.

use embassy_rp::i2c::{self, AbortReason, Blocking, I2c, Instance};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Device did not acknowledge
    Nack,
    /// Arbitration lost
    ArbitrationLost,
    /// Buffer length or address rejected by the driver
    Invalid,
    /// Other abort
    Other,
}

impl From<i2c::Error> for I2cBusError {
    fn from(e: i2c::Error) -> Self {
        match e {
            i2c::Error::Abort(AbortReason::NoAcknowledge) => I2cBusError::Nack,
            i2c::Error::Abort(AbortReason::ArbitrationLoss) => I2cBusError::ArbitrationLost,
            i2c::Error::Abort(_) => I2cBusError::Other,
            _ => I2cBusError::Invalid,
        }
    }
}

/// Build the embassy-rp configuration from the shared one
pub fn config(cfg: brooder_hal::I2cConfig) -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = cfg.frequency;
    config
}

/// Blocking I2C bus
pub struct RpI2c<'d, T: Instance> {
    i2c: I2c<'d, T, Blocking>,
}

impl<'d, T: Instance> RpI2c<'d, T> {
    /// Wrap a blocking I2C peripheral
    pub fn new(i2c: I2c<'d, T, Blocking>) -> Self {
        Self { i2c }
    }
}

impl<T: Instance> brooder_hal::I2cBus for RpI2c<'_, T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_write(address, data)?;
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.blocking_read(address, buf)?;
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.blocking_write_read(address, write_data, read_buf)?;
        Ok(())
    }
}
