//! Single-wire pulse capture
//!
//! Sensors such as the DHT22 answer a start signal on their data line
//! with a train of pulses whose high time encodes each bit. Timing them
//! needs microsecond resolution, so chip HALs implement the capture and
//! drivers decode the widths.

/// Errors from a pulse capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseError {
    /// The device never answered the start signal
    NoResponse,
    /// The line stopped toggling mid-frame
    Timeout,
}

/// Start-signal-then-measure capture on one data line
pub trait PulseCapture {
    /// Send the start signal and record the width of each high pulse (µs)
    ///
    /// Captures exactly `highs_us.len()` pulses.
    fn capture(&mut self, highs_us: &mut [u32]) -> Result<(), PulseError>;
}
