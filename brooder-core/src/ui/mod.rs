//! Screen rendering for the 16x2 LCD
//!
//! Screens are built into a [`Screen`] buffer first and only then pushed
//! to a [`Display`](crate::traits::Display), so unchanged status screens
//! cost no bus traffic.

pub mod renderer;
pub mod screen;

pub use renderer::Renderer;
pub use screen::{Line, Screen};

use core::fmt;

/// Write a °C × 10 value as `X.X`
pub fn fmt_x10<W: fmt::Write + ?Sized>(w: &mut W, value_x10: i32) -> fmt::Result {
    let sign = if value_x10 < 0 { "-" } else { "" };
    let abs = value_x10.unsigned_abs();
    write!(w, "{}{}.{}", sign, abs / 10, abs % 10)
}
