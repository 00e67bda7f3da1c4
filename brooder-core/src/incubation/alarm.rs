//! Hatch alarm state machine
//!
//! The alarm goes off once per arming, the first time the time of day
//! reaches the hatch hour. While sounding it pulses the buzzer on a fixed
//! cadence until the operator acknowledges it with the Next button.
//!
//! Pulses are scheduled deadlines checked on every tick, so the control
//! loop keeps running while the buzzer sounds.

use crate::config::AlarmConfig;

/// Alarm states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    /// Waiting for the hatch hour, or acknowledged
    Idle,
    /// Hatch hour reached and not yet acknowledged
    Sounding,
}

/// Alarm transitions worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmEvent {
    /// Idle → Sounding
    Triggered,
    /// Buzzer switched on
    PulseStarted,
    /// Buzzer switched off at the end of a pulse
    PulseEnded,
    /// Sounding → Idle by the operator
    Acknowledged,
}

/// Hatch alarm
#[derive(Debug, Clone)]
pub struct HatchAlarm {
    config: AlarmConfig,
    state: AlarmState,
    /// Set on the first trigger; the alarm never re-arms itself
    fired: bool,
    /// Reference point for the next pulse (ms)
    last_pulse_ms: u32,
    /// Start of the pulse currently sounding (ms)
    tone_started_ms: Option<u32>,
}

impl HatchAlarm {
    /// Create an idle alarm
    pub fn new(config: AlarmConfig) -> Self {
        Self {
            config,
            state: AlarmState::Idle,
            fired: false,
            last_pulse_ms: 0,
            tone_started_ms: None,
        }
    }

    /// Current state
    pub fn state(&self) -> AlarmState {
        self.state
    }

    /// Check if the alarm has gone off since arming
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Frequency the buzzer should play right now
    pub fn tone(&self) -> Option<u32> {
        self.tone_started_ms.map(|_| self.config.tone_hz)
    }

    /// Compare the time of day against the hatch hour
    ///
    /// Triggers at most once; the pulse cadence starts counting from the
    /// trigger, so the first tone follows one repeat interval later.
    pub fn check_deadline(
        &mut self,
        minute_of_day: i32,
        hatch_minutes: i32,
        now_ms: u32,
    ) -> Option<AlarmEvent> {
        if self.fired || minute_of_day < hatch_minutes {
            return None;
        }

        self.fired = true;
        self.state = AlarmState::Sounding;
        self.last_pulse_ms = now_ms;
        Some(AlarmEvent::Triggered)
    }

    /// Advance the pulse schedule
    pub fn update(&mut self, now_ms: u32) -> Option<AlarmEvent> {
        if self.state != AlarmState::Sounding {
            return None;
        }

        if let Some(started) = self.tone_started_ms {
            if now_ms.wrapping_sub(started) >= self.config.pulse_ms {
                self.tone_started_ms = None;
                return Some(AlarmEvent::PulseEnded);
            }
            return None;
        }

        if now_ms.wrapping_sub(self.last_pulse_ms) >= self.config.repeat_interval_ms {
            self.last_pulse_ms = now_ms;
            self.tone_started_ms = Some(now_ms);
            return Some(AlarmEvent::PulseStarted);
        }

        None
    }

    /// Operator acknowledgement; silences the buzzer immediately
    pub fn acknowledge(&mut self) -> Option<AlarmEvent> {
        if self.state != AlarmState::Sounding {
            return None;
        }
        self.state = AlarmState::Idle;
        self.tone_started_ms = None;
        Some(AlarmEvent::Acknowledged)
    }
}
