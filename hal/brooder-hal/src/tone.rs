//! Tone generation
//!
//! A piezo buzzer needs a square wave rather than a steady level.
//! Chip HALs implement this with a PWM slice at 50% duty.

/// Square-wave output for a passive buzzer
pub trait ToneOutput {
    /// Start a tone at the given frequency
    fn start(&mut self, frequency_hz: u32);

    /// Stop the tone and leave the pin low
    fn stop(&mut self);

    /// Check if a tone is currently playing
    fn is_playing(&self) -> bool;
}
