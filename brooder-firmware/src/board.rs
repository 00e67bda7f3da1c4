//! Reference board wiring
//!
//! | Function        | GPIO | Notes                       |
//! |-----------------|------|-----------------------------|
//! | Next            | 2    | button to GND, pull-up      |
//! | Increment       | 3    | button to GND, pull-up      |
//! | Decrement       | 4    | button to GND, pull-up      |
//! | Cursor left     | 5    | button to GND, pull-up      |
//! | Cursor right    | 6    | button to GND, pull-up      |
//! | I2C0 SDA        | 8    | DS1307 + PCF8574 backpack   |
//! | I2C0 SCL        | 9    |                             |
//! | Buzzer          | 14   | PWM7 A                      |
//! | DHT22 data      | 15   |                             |
//! | Heater relay    | 16   | active-high                 |
//! | Fan relay       | 17   | active-high                 |

use embassy_rp::gpio::Input;
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use brooder_core::input::{Button, ButtonLevels};
use brooder_core::Peripherals;
use brooder_drivers::buzzer::Buzzer;
use brooder_drivers::display::Hd44780;
use brooder_drivers::relay::RelayPair;
use brooder_drivers::rtc::Ds1307;
use brooder_drivers::sensor::Dht22;
use brooder_hal::gpio::ActiveLowButton;
use brooder_hal::SharedBus;
use brooder_hal_rp2040::gpio::{RpInput, RpOutput};
use brooder_hal_rp2040::i2c::RpI2c;
use brooder_hal_rp2040::pulse::FlexPulseCapture;
use brooder_hal_rp2040::pwm::PwmTone;

/// Handle onto the shared I2C0 bus
pub type Bus<'a> = SharedBus<'a, RpI2c<'static, I2C0>>;

/// Everything the incubator drives
pub type Board<'a> = Peripherals<
    Ds1307<Bus<'a>>,
    Dht22<FlexPulseCapture<'static>>,
    Hd44780<Bus<'a>, Delay>,
    RelayPair<RpOutput<'static>, RpOutput<'static>>,
    Buzzer<PwmTone<'static>>,
>;

/// The five front-panel buttons
pub struct FrontPanel<'d> {
    /// Indexed by [`Button::index`]
    buttons: [ActiveLowButton<RpInput<'d>>; Button::COUNT],
}

impl<'d> FrontPanel<'d> {
    /// Take the button inputs, already configured with pull-ups
    pub fn new(
        next: Input<'d>,
        increment: Input<'d>,
        decrement: Input<'d>,
        left: Input<'d>,
        right: Input<'d>,
    ) -> Self {
        let button = |pin| ActiveLowButton::new(RpInput::new(pin));
        Self {
            buttons: [
                button(next),
                button(increment),
                button(decrement),
                button(left),
                button(right),
            ],
        }
    }

    /// Sample the raw button levels
    pub fn levels(&self) -> ButtonLevels {
        let mut levels = ButtonLevels::RELEASED;
        for b in Button::ALL {
            levels.set(b, self.buttons[b.index()].is_pressed());
        }
        levels
    }
}
