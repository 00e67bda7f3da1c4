//! RP2040-specific HAL for the incubator firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `brooder-hal` traits on top of embassy-rp:
//!
//! - GPIO output/input wrappers
//! - Blocking I2C master
//! - PWM tone generation for the buzzer
//! - Bit-banged single-wire pulse capture for the DHT22

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod pulse;
pub mod pwm;

// Re-export shared traits from brooder-hal for convenience
pub use brooder_hal::{I2cBus, InputPin, OutputPin, PulseCapture, ToneOutput};
