//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in brooder-core, written against the brooder-hal pin and bus traits:
//!
//! - Relays (heater and fan, interlocked)
//! - Piezo buzzer
//! - DS1307 real-time clock
//! - DHT22 temperature/humidity sensor
//! - HD44780 character LCD behind a PCF8574 I2C backpack

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod display;
pub mod relay;
pub mod rtc;
pub mod sensor;
