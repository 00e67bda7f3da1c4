//! Front-panel button input
//!
//! Raw pin levels are turned into discrete press events by the
//! [`Debouncer`], which never blocks the control loop.

pub mod button;
pub mod debounce;

pub use button::{Button, ButtonLevels};
pub use debounce::{Debouncer, Presses};
