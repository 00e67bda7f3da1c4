//! Temperature sensor trait

/// Errors that can occur with temperature sensing
///
/// The controller never sees a "not a number" reading; every failure is
/// one of these and is handled by [`crate::safety::SensorMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorReadError {
    /// Sensor did not answer the start signal
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// Reading outside the sensor's rated range
    OutOfRange,
    /// Transport error talking to the sensor
    Bus,
}

/// Trait for temperature sensors
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Returns a fixed-point value with 0.1°C resolution.
    /// For example, 37.5°C is returned as 375.
    fn read_celsius_x10(&mut self) -> Result<i16, SensorReadError>;
}
