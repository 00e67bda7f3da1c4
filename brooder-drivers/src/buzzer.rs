//! Piezo buzzer

use brooder_core::traits::AlarmOutput;
use brooder_hal::ToneOutput;

/// Passive buzzer driven by a tone generator
///
/// Only touches the hardware when the requested tone changes, so the
/// control loop can restate the tone on every tick.
pub struct Buzzer<T> {
    tone: T,
    frequency_hz: Option<u32>,
}

impl<T: ToneOutput> Buzzer<T> {
    /// Create a silent buzzer
    pub fn new(mut tone: T) -> Self {
        tone.stop();
        Self {
            tone,
            frequency_hz: None,
        }
    }

    /// Frequency currently playing
    pub fn frequency_hz(&self) -> Option<u32> {
        self.frequency_hz
    }
}

impl<T: ToneOutput> AlarmOutput for Buzzer<T> {
    fn set_tone(&mut self, frequency_hz: Option<u32>) {
        if frequency_hz == self.frequency_hz && frequency_hz.is_some() == self.tone.is_playing() {
            return;
        }
        match frequency_hz {
            Some(hz) if hz > 0 => {
                self.tone.start(hz);
                self.frequency_hz = Some(hz);
            }
            _ => {
                self.tone.stop();
                self.frequency_hz = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockTone {
        playing: Option<u32>,
        starts: u32,
        stops: u32,
    }

    impl ToneOutput for MockTone {
        fn start(&mut self, frequency_hz: u32) {
            self.playing = Some(frequency_hz);
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.playing = None;
            self.stops += 1;
        }

        fn is_playing(&self) -> bool {
            self.playing.is_some()
        }
    }

    #[test]
    fn test_restating_tone_is_free() {
        let mut buzzer = Buzzer::new(MockTone::default());
        assert_eq!(buzzer.tone.stops, 1);

        buzzer.set_tone(Some(1_000));
        buzzer.set_tone(Some(1_000));
        assert_eq!(buzzer.tone.starts, 1);
        assert_eq!(buzzer.tone.playing, Some(1_000));

        buzzer.set_tone(None);
        buzzer.set_tone(None);
        assert_eq!(buzzer.tone.stops, 2);
        assert_eq!(buzzer.frequency_hz(), None);
    }

    #[test]
    fn test_frequency_change_restarts() {
        let mut buzzer = Buzzer::new(MockTone::default());
        buzzer.set_tone(Some(1_000));
        buzzer.set_tone(Some(2_000));
        assert_eq!(buzzer.tone.starts, 2);
        assert_eq!(buzzer.tone.playing, Some(2_000));
    }

    #[test]
    fn test_zero_frequency_is_silence() {
        let mut buzzer = Buzzer::new(MockTone::default());
        buzzer.set_tone(Some(0));
        assert!(!buzzer.tone.is_playing());
        assert_eq!(buzzer.frequency_hz(), None);
    }
}
