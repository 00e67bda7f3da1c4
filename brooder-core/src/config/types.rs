//! Configuration type definitions
//!
//! Defaults reproduce the behaviour of the original front panel: a 300 ms
//! button window, a 10 s tone every 5 min once the hatch hour is reached,
//! and a 37.5°C target.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::menu::field::{DateTimeField, DEFAULT_TARGET_X10};

/// Highest valid 7-bit I2C address
pub const MAX_I2C_ADDRESS: u8 = 0x7F;

/// Values the menu starts from after power-on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefaultsConfig {
    /// Target temperature (°C × 10)
    pub target_temp_x10: i16,
    /// Initial start time
    pub start: DateTimeField,
    /// Initial hatch time
    pub hatch: DateTimeField,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            target_temp_x10: DEFAULT_TARGET_X10,
            start: DateTimeField::default(),
            hatch: DateTimeField::default(),
        }
    }
}

/// Button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Minimum time between accepted presses of one button (ms)
    pub debounce_ms: u32,
    /// Auto-repeat period while a button is held (ms, 0 = off)
    pub repeat_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            repeat_ms: 300,
        }
    }
}

/// Hatch alarm timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlarmConfig {
    /// Time between the starts of consecutive tone pulses (ms)
    pub repeat_interval_ms: u32,
    /// Length of one tone pulse (ms)
    pub pulse_ms: u32,
    /// Buzzer frequency (Hz)
    pub tone_hz: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            repeat_interval_ms: 300_000,
            pulse_ms: 10_000,
            tone_hz: 1_000,
        }
    }
}

/// What to do when the temperature sensor fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorPolicy {
    /// Keep regulating on the last good reading for a few failed reads
    #[default]
    HoldLast,
    /// Switch heater and fan off on the first failed read
    FailSafe,
}

impl SensorPolicy {
    /// Parse the config file spelling
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hold_last" => Some(SensorPolicy::HoldLast),
            "fail_safe" => Some(SensorPolicy::FailSafe),
            _ => None,
        }
    }
}

/// Temperature sensor handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Failure policy
    pub policy: SensorPolicy,
    /// Consecutive failed reads tolerated under `HoldLast`
    pub max_stale_reads: u8,
    /// Minimum time between sensor reads (ms); the DHT22 needs 2 s
    pub min_read_interval_ms: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            policy: SensorPolicy::HoldLast,
            max_stale_reads: 3,
            min_read_interval_ms: 2_000,
        }
    }
}

/// Control loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopConfig {
    /// Polling period (ms)
    pub tick_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { tick_ms: 50 }
    }
}

/// Bus addresses of the board peripherals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HardwareConfig {
    /// PCF8574 LCD backpack address
    pub lcd_address: u8,
    /// DS1307 address
    pub rtc_address: u8,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            lcd_address: 0x27,
            rtc_address: 0x68,
        }
    }
}

/// Complete incubator configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IncubatorConfig {
    pub defaults: DefaultsConfig,
    pub input: InputConfig,
    pub alarm: AlarmConfig,
    pub sensor: SensorConfig,
    pub control_loop: LoopConfig,
    pub hardware: HardwareConfig,
}

/// Configuration validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Default target temperature below 0°C
    NegativeTarget,
    /// Default start or hatch time outside the field ranges
    InvalidDefaultTime,
    /// Alarm repeat interval is zero
    ZeroAlarmInterval,
    /// Tone pulse length is zero
    ZeroPulse,
    /// Tone pulse does not fit inside the repeat interval
    PulseExceedsInterval,
    /// Tone frequency is zero
    ZeroToneFrequency,
    /// Control loop period is zero
    ZeroTick,
    /// I2C address does not fit in 7 bits
    InvalidAddress,
}

impl IncubatorConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.target_temp_x10 < 0 {
            return Err(ConfigError::NegativeTarget);
        }
        if !self.defaults.start.is_valid() || !self.defaults.hatch.is_valid() {
            return Err(ConfigError::InvalidDefaultTime);
        }
        if self.alarm.repeat_interval_ms == 0 {
            return Err(ConfigError::ZeroAlarmInterval);
        }
        if self.alarm.pulse_ms == 0 {
            return Err(ConfigError::ZeroPulse);
        }
        if self.alarm.pulse_ms >= self.alarm.repeat_interval_ms {
            return Err(ConfigError::PulseExceedsInterval);
        }
        if self.alarm.tone_hz == 0 {
            return Err(ConfigError::ZeroToneFrequency);
        }
        if self.control_loop.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.hardware.lcd_address > MAX_I2C_ADDRESS
            || self.hardware.rtc_address > MAX_I2C_ADDRESS
        {
            return Err(ConfigError::InvalidAddress);
        }
        Ok(())
    }
}
