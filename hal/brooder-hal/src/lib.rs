//! Brooder Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. Device drivers in `brooder-drivers` are written
//! against these traits only, so they can be unit tested on the host with
//! mock pins and buses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (brooder-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  brooder-drivers (DS1307, LCD, relays)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  brooder-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ brooder-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations, [`i2c::SharedBus`] for sharing one bus
//! - [`tone::ToneOutput`] - Square-wave tone generation for a piezo buzzer
//! - [`pulse::PulseCapture`] - Single-wire sensor pulse timing

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod pulse;
pub mod tone;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig, SharedBus};
pub use pulse::{PulseCapture, PulseError};
pub use tone::ToneOutput;
