//! Configuration menu
//!
//! Lets the operator cycle through the start time, hatch time and target
//! temperature, then arm the incubator. The menu is explicit, finite and
//! deterministic: every change is a function of the current state and one
//! button press.

pub mod field;
pub mod machine;
pub mod state;

pub use field::{DateTimeField, FieldComponent, FieldCursor, TargetTemperature};
pub use machine::{ConfigMenu, IncubationSettings, MenuOutcome};
pub use state::ConfigState;
