//! PWM tone output
//!
//! A passive piezo needs a square wave. One PWM slice runs at the tone
//! frequency with channel A at 50% duty.
//!
//! ```text
//! f = clk_sys / (divider * (top + 1))
//! ```

use embassy_rp::pwm::{Config, Pwm};
use fixed::types::U12F4;

/// Largest integer clock divider
const MAX_DIVIDER: u32 = 255;

/// Divider and wrap value for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneParams {
    pub divider: u8,
    pub top: u16,
}

/// Pick the smallest integer divider that lets `top` fit in 16 bits
///
/// Returns `None` for 0 Hz or a frequency the slice cannot reach.
pub fn tone_params(clk_hz: u32, frequency_hz: u32) -> Option<ToneParams> {
    if frequency_hz == 0 || frequency_hz > clk_hz / 2 {
        return None;
    }
    let cycles = clk_hz / frequency_hz;
    let divider = cycles.div_ceil(1 << 16).max(1);
    if divider > MAX_DIVIDER {
        return None;
    }
    let top = (cycles / divider).saturating_sub(1);
    Some(ToneParams {
        divider: divider as u8,
        top: top as u16,
    })
}

/// Buzzer driven from PWM channel A
pub struct PwmTone<'d> {
    pwm: Pwm<'d>,
    clk_hz: u32,
    playing: bool,
}

impl<'d> PwmTone<'d> {
    /// Wrap a PWM slice configured for channel A only; starts silent
    pub fn new(pwm: Pwm<'d>) -> Self {
        let mut tone = Self {
            pwm,
            clk_hz: embassy_rp::clocks::clk_sys_freq(),
            playing: false,
        };
        tone.silence();
        tone
    }

    fn silence(&mut self) {
        let mut config = Config::default();
        config.compare_a = 0;
        config.enable = false;
        self.pwm.set_config(&config);
    }
}

impl brooder_hal::ToneOutput for PwmTone<'_> {
    fn start(&mut self, frequency_hz: u32) {
        let Some(params) = tone_params(self.clk_hz, frequency_hz) else {
            self.stop();
            return;
        };
        let mut config = Config::default();
        config.divider = U12F4::from_num(params.divider);
        config.top = params.top;
        config.compare_a = (params.top / 2).saturating_add(1);
        config.enable = true;
        self.pwm.set_config(&config);
        self.playing = true;
    }

    fn stop(&mut self) {
        self.silence();
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
