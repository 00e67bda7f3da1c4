//! Firmware tasks

pub mod control;
