//! Non-blocking button debouncing
//!
//! Each button keeps the timestamp of its last accepted press. A press is
//! accepted on the released → pressed edge unless it falls inside the
//! debounce window of the previous accepted press. A button held down
//! auto-repeats every `repeat_ms`.

use heapless::Vec;

use super::button::{Button, ButtonLevels};
use crate::config::InputConfig;

/// Presses accepted during one poll, in polling order
pub type Presses = Vec<Button, { Button::COUNT }>;

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    /// Level seen on the previous sample
    held: bool,
    /// Timestamp of the last accepted press (ms)
    last_accepted_ms: Option<u32>,
}

/// Edge detector with a per-button quiescent window
#[derive(Debug, Clone)]
pub struct Debouncer {
    debounce_ms: u32,
    repeat_ms: u32,
    slots: [Slot; Button::COUNT],
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl Debouncer {
    /// Create a debouncer with the configured timings
    pub fn new(config: &InputConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            repeat_ms: config.repeat_ms,
            slots: [Slot::default(); Button::COUNT],
        }
    }

    /// Sample one button and report whether a press was accepted
    pub fn sample(&mut self, button: Button, pressed: bool, now_ms: u32) -> bool {
        let slot = &mut self.slots[button.index()];

        if !pressed {
            slot.held = false;
            return false;
        }

        let was_held = slot.held;
        slot.held = true;

        let accept = match slot.last_accepted_ms {
            None => true,
            Some(last) => {
                let elapsed = now_ms.wrapping_sub(last);
                if was_held {
                    self.repeat_ms > 0 && elapsed >= self.repeat_ms.max(self.debounce_ms)
                } else {
                    elapsed >= self.debounce_ms
                }
            }
        };

        if accept {
            slot.last_accepted_ms = Some(now_ms);
        }
        accept
    }

    /// Sample every button
    pub fn poll(&mut self, levels: ButtonLevels, now_ms: u32) -> Presses {
        let mut presses = Presses::new();
        for button in Button::ALL {
            if self.sample(button, levels.is_pressed(button), now_ms) {
                // Capacity equals the button count
                let _ = presses.push(button);
            }
        }
        presses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer(debounce_ms: u32, repeat_ms: u32) -> Debouncer {
        Debouncer::new(&InputConfig {
            debounce_ms,
            repeat_ms,
        })
    }

    #[test]
    fn test_first_press_accepted() {
        let mut d = debouncer(300, 0);
        assert!(d.sample(Button::Next, true, 1_000));
    }

    #[test]
    fn test_bounce_rejected_inside_window() {
        let mut d = debouncer(300, 0);
        assert!(d.sample(Button::Next, true, 1_000));
        assert!(!d.sample(Button::Next, false, 1_005));
        assert!(!d.sample(Button::Next, true, 1_010));
        assert!(!d.sample(Button::Next, false, 1_200));
        assert!(d.sample(Button::Next, true, 1_300));
    }

    #[test]
    fn test_hold_without_repeat_fires_once() {
        let mut d = debouncer(300, 0);
        assert!(d.sample(Button::Increment, true, 0));
        for t in (50..5_000).step_by(50) {
            assert!(!d.sample(Button::Increment, true, t));
        }
    }

    #[test]
    fn test_hold_repeats() {
        let mut d = debouncer(300, 300);
        assert!(d.sample(Button::Increment, true, 0));
        assert!(!d.sample(Button::Increment, true, 250));
        assert!(d.sample(Button::Increment, true, 300));
        assert!(!d.sample(Button::Increment, true, 550));
        assert!(d.sample(Button::Increment, true, 600));
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut d = debouncer(300, 0);
        assert!(d.sample(Button::Increment, true, 0));
        assert!(d.sample(Button::Decrement, true, 10));
    }

    #[test]
    fn test_poll_order() {
        let mut d = debouncer(300, 0);
        let mut levels = ButtonLevels::RELEASED;
        levels.set(Button::CursorRight, true);
        levels.set(Button::Next, true);

        let presses = d.poll(levels, 0);
        assert_eq!(presses.as_slice(), &[Button::Next, Button::CursorRight]);
    }

    #[test]
    fn test_timer_wraparound() {
        let mut d = debouncer(300, 0);
        assert!(d.sample(Button::Next, true, u32::MAX - 100));
        d.sample(Button::Next, false, u32::MAX - 50);
        assert!(!d.sample(Button::Next, true, 100));
        d.sample(Button::Next, false, 150);
        assert!(d.sample(Button::Next, true, 250));
    }
}
