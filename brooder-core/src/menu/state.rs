//! Menu states

/// Configuration menu states
///
/// `Armed` is the last state in the cycle. The application treats reaching
/// it as a one-way hand-over to the incubation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigState {
    /// Editing the incubation start date and hour
    EditingStartTime,
    /// Editing the expected hatch date and hour
    EditingHatchTime,
    /// Editing the target temperature
    EditingTemperature,
    /// Configuration finalised
    Armed,
}

impl ConfigState {
    /// Every state, in cycle order
    pub const ALL: [ConfigState; 4] = [
        ConfigState::EditingStartTime,
        ConfigState::EditingHatchTime,
        ConfigState::EditingTemperature,
        ConfigState::Armed,
    ];

    /// State reached by pressing Next
    pub fn next(self) -> Self {
        match self {
            ConfigState::EditingStartTime => ConfigState::EditingHatchTime,
            ConfigState::EditingHatchTime => ConfigState::EditingTemperature,
            ConfigState::EditingTemperature => ConfigState::Armed,
            ConfigState::Armed => ConfigState::EditingStartTime,
        }
    }

    /// Label shown on the first display row
    pub fn label(&self) -> &'static str {
        match self {
            ConfigState::EditingStartTime => "Start Time:",
            ConfigState::EditingHatchTime => "Hatch Time:",
            ConfigState::EditingTemperature => "Temperature:",
            ConfigState::Armed => "",
        }
    }

    /// Check if this state edits a date/time field
    pub fn edits_date_time(&self) -> bool {
        matches!(
            self,
            ConfigState::EditingStartTime | ConfigState::EditingHatchTime
        )
    }

    /// Check if configuration is finalised
    pub fn is_armed(&self) -> bool {
        matches!(self, ConfigState::Armed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        let mut state = ConfigState::EditingStartTime;
        for expected in ConfigState::ALL.iter().cycle().skip(1).take(8) {
            state = state.next();
            assert_eq!(state, *expected);
        }
    }

    #[test]
    fn test_armed_wraps_to_start() {
        assert_eq!(ConfigState::Armed.next(), ConfigState::EditingStartTime);
    }

    #[test]
    fn test_edits_date_time() {
        assert!(ConfigState::EditingStartTime.edits_date_time());
        assert!(ConfigState::EditingHatchTime.edits_date_time());
        assert!(!ConfigState::EditingTemperature.edits_date_time());
        assert!(!ConfigState::Armed.edits_date_time());
    }
}
