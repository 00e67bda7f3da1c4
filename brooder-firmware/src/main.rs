//! Brooder - Egg Incubator Firmware
//!
//! Main firmware binary for RP2040-based incubator boards. The operator
//! sets the start time, hatch time and target temperature from five
//! buttons and a 16x2 LCD; once armed the board holds the temperature
//! with a heater and a fan and sounds a buzzer when the hatch hour comes.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::i2c::I2c;
use embassy_rp::pwm::{self, Pwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use brooder_core::{Incubator, Peripherals};
use brooder_drivers::buzzer::Buzzer;
use brooder_drivers::display::Hd44780;
use brooder_drivers::relay::{GpioRelay, RelayPair};
use brooder_drivers::rtc::Ds1307;
use brooder_drivers::sensor::Dht22;
use brooder_hal::{I2cConfig, SharedBus};
use brooder_hal_rp2040::gpio::RpOutput;
use brooder_hal_rp2040::i2c::{self as rp_i2c, RpI2c};
use brooder_hal_rp2040::pulse::FlexPulseCapture;
use brooder_hal_rp2040::pwm::PwmTone;

use crate::board::{Board, FrontPanel};

mod board;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Brooder firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // I2C0 is shared by the RTC and the LCD backpack (SDA=GPIO8, SCL=GPIO9)
    let i2c = I2c::new_blocking(
        p.I2C0,
        p.PIN_9,
        p.PIN_8,
        rp_i2c::config(I2cConfig::STANDARD),
    );
    let bus = RefCell::new(RpI2c::new(i2c));

    let mut rtc = Ds1307::with_address(SharedBus::new(&bus), config.hardware.rtc_address);
    // A fresh or battery-less DS1307 sits halted; start it at the default start time
    match config.defaults.start.to_wall_time() {
        Some(fallback) => match rtc.start_if_halted(&fallback) {
            Ok(false) => info!("RTC running"),
            Ok(true) => warn!("RTC was halted, started at {}", fallback),
            Err(e) => warn!("RTC start failed: {}", e),
        },
        None => match rtc.is_halted() {
            Ok(false) => info!("RTC running"),
            Ok(true) => warn!("RTC halted and default start time is not a clock time"),
            Err(e) => warn!("RTC not responding: {}", e),
        },
    }

    let mut lcd = Hd44780::new(SharedBus::new(&bus), Delay, config.hardware.lcd_address);
    if let Err(e) = lcd.init() {
        warn!("LCD init failed: {}", e);
    }

    // Relays: heater GPIO16, fan GPIO17, both active-high
    let climate = RelayPair::new(
        GpioRelay::new_active_high(RpOutput::new(Output::new(p.PIN_16, Level::Low))),
        GpioRelay::new_active_high(RpOutput::new(Output::new(p.PIN_17, Level::Low))),
    );

    // Buzzer on GPIO14 = PWM slice 7, channel A
    let pwm = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, pwm::Config::default());
    let alarm = Buzzer::new(PwmTone::new(pwm));

    // DHT22 data line on GPIO15 (external 10k pull-up recommended)
    let sensor = Dht22::new(FlexPulseCapture::new(Flex::new(p.PIN_15)));

    // Buttons to ground on GPIO2-6 with internal pull-ups
    let panel = FrontPanel::new(
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
    );

    let board: Board<'_> = Peripherals {
        clock: rtc,
        sensor,
        display: lcd,
        climate,
        alarm,
    };
    info!("Hardware initialized");

    tasks::control::run(Incubator::new(config), board, panel).await
}
