//! Bit-banged single-wire pulse capture
//!
//! Host start: pull the line low for `start_low_us`, then release it to
//! the pull-up. The device answers with ~80µs low and ~80µs high, then
//! each bit as ~50µs low followed by a high whose width is recorded.
//!
//! Runs with interrupts masked so an interrupt cannot stretch a pulse.

use brooder_hal::{PulseCapture, PulseError};
use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration, Instant};

/// Start signal length for the DHT22 (µs)
pub const DHT22_START_LOW_US: u64 = 1_100;

/// Longest any single level may last before giving up (µs)
const LEVEL_TIMEOUT_US: u64 = 200;

/// Pulse capture on a bidirectional pin
pub struct FlexPulseCapture<'d> {
    pin: Flex<'d>,
    start_low_us: u64,
}

impl<'d> FlexPulseCapture<'d> {
    /// Take a pin for a DHT22 data line
    pub fn new(pin: Flex<'d>) -> Self {
        Self::with_start_low(pin, DHT22_START_LOW_US)
    }

    /// Take a pin with a custom start signal length
    pub fn with_start_low(mut pin: Flex<'d>, start_low_us: u64) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self { pin, start_low_us }
    }

    /// Wait while the line stays at `level`; returns how long it did (µs)
    fn wait_while(&self, level: bool) -> Option<u64> {
        let start = Instant::now();
        while self.pin.is_high() == level {
            if start.elapsed().as_micros() > LEVEL_TIMEOUT_US {
                return None;
            }
        }
        Some(start.elapsed().as_micros())
    }
}

impl PulseCapture for FlexPulseCapture<'_> {
    fn capture(&mut self, highs_us: &mut [u32]) -> Result<(), PulseError> {
        self.pin.set_low();
        self.pin.set_as_output();
        block_for(Duration::from_micros(self.start_low_us));
        self.pin.set_as_input();

        cortex_m::interrupt::free(|_| {
            // Pull-up phase before the device takes the line
            self.wait_while(true).ok_or(PulseError::NoResponse)?;
            // Response: low then high
            self.wait_while(false).ok_or(PulseError::NoResponse)?;
            self.wait_while(true).ok_or(PulseError::NoResponse)?;

            for width in highs_us.iter_mut() {
                self.wait_while(false).ok_or(PulseError::Timeout)?;
                let high = self.wait_while(true).ok_or(PulseError::Timeout)?;
                *width = high as u32;
            }
            Ok(())
        })
    }
}
