//! Actuator traits

/// Heater and fan relays
///
/// Implementations must never leave both relays energised; callers
/// switch one off before switching the other on.
pub trait ClimateOutputs {
    /// Switch the heater relay
    fn set_heater(&mut self, on: bool);

    /// Switch the fan relay
    fn set_fan(&mut self, on: bool);
}

/// Alarm buzzer
pub trait AlarmOutput {
    /// Sound a tone at `frequency_hz`, or silence the buzzer with `None`
    fn set_tone(&mut self, frequency_hz: Option<u32>);
}
