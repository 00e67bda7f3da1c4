//! Relay outputs
//!
//! Heater and fan are switched by relay modules on GPIO pins. Many cheap
//! relay boards are active-low, so the polarity is configurable.

use brooder_core::traits::ClimateOutputs;
use brooder_hal::OutputPin;

/// A relay on a GPIO pin
pub struct GpioRelay<P> {
    pin: P,
    /// If true, relay ON = pin LOW
    inverted: bool,
    /// Current logical state (true = energised)
    on: bool,
}

impl<P: OutputPin> GpioRelay<P> {
    /// Create a relay output; the relay starts released
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin driving the relay input
    /// - `inverted`: If true, the relay is energised when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut relay = Self {
            pin,
            inverted,
            on: false,
        };
        relay.set_on(false);
        relay
    }

    /// Relay energised by a HIGH pin
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Relay energised by a LOW pin
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Switch the relay
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(on != self.inverted);
    }

    /// Logical relay state
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

/// Heater and fan relays, interlocked
///
/// Switching one relay on always releases the other first, so both are
/// never energised at the same time.
pub struct RelayPair<H, F> {
    heater: GpioRelay<H>,
    fan: GpioRelay<F>,
}

impl<H: OutputPin, F: OutputPin> RelayPair<H, F> {
    /// Pair two relays; both start released
    pub fn new(heater: GpioRelay<H>, fan: GpioRelay<F>) -> Self {
        let mut pair = Self { heater, fan };
        pair.all_off();
        pair
    }

    /// Release both relays
    pub fn all_off(&mut self) {
        self.heater.set_on(false);
        self.fan.set_on(false);
    }

    /// Heater relay state
    pub fn heater_on(&self) -> bool {
        self.heater.is_on()
    }

    /// Fan relay state
    pub fn fan_on(&self) -> bool {
        self.fan.is_on()
    }
}

impl<H: OutputPin, F: OutputPin> ClimateOutputs for RelayPair<H, F> {
    fn set_heater(&mut self, on: bool) {
        if on {
            self.fan.set_on(false);
        }
        self.heater.set_on(on);
    }

    fn set_fan(&mut self, on: bool) {
        if on {
            self.heater.set_on(false);
        }
        self.fan.set_on(on);
    }
}
