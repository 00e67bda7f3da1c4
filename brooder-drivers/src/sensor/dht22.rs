//! DHT22 (AM2302) temperature and humidity sensor
//!
//! Single-wire protocol. After the host start signal the sensor sends 40
//! bits; each bit is a ~50µs low followed by a high whose length encodes
//! the value (~26µs = 0, ~70µs = 1). The frame is:
//!
//! ```text
//! [hum_hi] [hum_lo] [temp_hi] [temp_lo] [checksum]
//! ```
//!
//! Both values are already in tenths. Temperature is sign-magnitude with
//! the sign in bit 15. The sensor must not be polled more often than
//! every 2 seconds.

use brooder_core::traits::{SensorReadError, TemperatureSensor};
use brooder_hal::{PulseCapture, PulseError};

/// Bits per frame
pub const FRAME_BITS: usize = 40;

/// High pulses longer than this are ones (µs)
pub const ONE_THRESHOLD_US: u32 = 50;

/// Lowest temperature the sensor can report (°C × 10)
pub const MIN_TEMP_X10: i16 = -400;

/// Highest temperature the sensor can report (°C × 10)
pub const MAX_TEMP_X10: i16 = 800;

/// Highest humidity (% × 10)
pub const MAX_HUMIDITY_X10: u16 = 1000;

/// One decoded measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dht22Reading {
    /// Relative humidity (% × 10)
    pub humidity_x10: u16,
    /// Temperature (°C × 10)
    pub temperature_x10: i16,
}

/// Pack pulse widths into frame bytes, MSB first
pub fn bits_from_pulses(highs_us: &[u32; FRAME_BITS]) -> [u8; 5] {
    let mut frame = [0u8; 5];
    for (i, width) in highs_us.iter().enumerate() {
        if *width > ONE_THRESHOLD_US {
            frame[i / 8] |= 0x80 >> (i % 8);
        }
    }
    frame
}

/// Verify and decode a frame
pub fn decode_frame(frame: &[u8; 5]) -> Result<Dht22Reading, SensorReadError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorReadError::Checksum);
    }

    let humidity_x10 = u16::from_be_bytes([frame[0], frame[1]]);
    let magnitude = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]) as i16;
    let temperature_x10 = if frame[2] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    if !(MIN_TEMP_X10..=MAX_TEMP_X10).contains(&temperature_x10) || humidity_x10 > MAX_HUMIDITY_X10
    {
        return Err(SensorReadError::OutOfRange);
    }

    Ok(Dht22Reading {
        humidity_x10,
        temperature_x10,
    })
}

/// DHT22 sensor
pub struct Dht22<C> {
    capture: C,
}

impl<C: PulseCapture> Dht22<C> {
    /// Create a sensor over a pulse capture
    pub fn new(capture: C) -> Self {
        Self { capture }
    }

    /// Read one frame
    pub fn read(&mut self) -> Result<Dht22Reading, SensorReadError> {
        let mut highs = [0u32; FRAME_BITS];
        self.capture.capture(&mut highs).map_err(|e| match e {
            PulseError::NoResponse | PulseError::Timeout => SensorReadError::Timeout,
        })?;
        decode_frame(&bits_from_pulses(&highs))
    }
}

impl<C: PulseCapture> TemperatureSensor for Dht22<C> {
    fn read_celsius_x10(&mut self) -> Result<i16, SensorReadError> {
        self.read().map(|r| r.temperature_x10)
    }
}
