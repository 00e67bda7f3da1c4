//! Board-agnostic core logic for the incubator firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (clock, sensor, display, relays, buzzer)
//! - Configuration menu state machine and field editing
//! - Incubation controller: climate regulation and the hatch alarm
//! - Button debouncing
//! - Sensor fault policy
//! - Screen rendering for the 16x2 LCD
//! - Configuration types and the `incubator.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod incubation;
pub mod input;
pub mod menu;
pub mod safety;
pub mod traits;
pub mod ui;

pub use app::{Activity, Incubator, Peripherals, TickOutcome};
