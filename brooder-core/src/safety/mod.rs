//! Sensor fault handling
//!
//! Decides which temperature the controller regulates on when the
//! sensor misbehaves.

pub mod monitor;

pub use monitor::{SensorMonitor, SensorStatus};
