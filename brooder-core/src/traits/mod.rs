//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the external collaborators: real-time clock, temperature sensor,
//! character display and the relay/buzzer outputs.

pub mod clock;
pub mod display;
pub mod outputs;
pub mod sensor;

pub use clock::{Clock, ClockError, WallTime};
pub use display::{Display, DisplayError, DisplayExt, DISPLAY_COLS, DISPLAY_ROWS};
pub use outputs::{AlarmOutput, ClimateOutputs};
pub use sensor::{SensorReadError, TemperatureSensor};
