//! Bang-bang climate regulation
//!
//! Heats below the target, ventilates above it, and idles exactly on it.
//! There is no hysteresis band.

use crate::traits::ClimateOutputs;

/// Heater/fan decision for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClimateCommand {
    /// Below target: heater on, fan off
    Heat,
    /// Above target: heater off, fan on
    Cool,
    /// At target: both off
    Hold,
    /// No usable temperature: both off
    Off,
}

impl ClimateCommand {
    /// Heater relay state for this command
    pub fn heater_on(&self) -> bool {
        matches!(self, ClimateCommand::Heat)
    }

    /// Fan relay state for this command
    pub fn fan_on(&self) -> bool {
        matches!(self, ClimateCommand::Cool)
    }

    /// Drive the relays
    ///
    /// The relay being switched off is always written first so both are
    /// never on together, even momentarily.
    pub fn apply<O: ClimateOutputs + ?Sized>(&self, outputs: &mut O) {
        if self.heater_on() {
            outputs.set_fan(false);
            outputs.set_heater(true);
        } else {
            outputs.set_heater(false);
            outputs.set_fan(self.fan_on());
        }
    }
}

/// Decide the relay states from the current and target temperature
pub fn regulate(temp_x10: i16, target_x10: i32) -> ClimateCommand {
    let temp_x10 = i32::from(temp_x10);
    if temp_x10 < target_x10 {
        ClimateCommand::Heat
    } else if temp_x10 > target_x10 {
        ClimateCommand::Cool
    } else {
        ClimateCommand::Hold
    }
}
