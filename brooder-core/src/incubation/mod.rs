//! Incubation controller
//!
//! Runs once the menu is armed: regulates the heater and fan against the
//! target temperature and sounds the hatch alarm.

pub mod alarm;
pub mod controller;
pub mod regulation;

pub use alarm::{AlarmEvent, AlarmState, HatchAlarm};
pub use controller::{IncubationController, StatusView, TickReport};
pub use regulation::{regulate, ClimateCommand};
