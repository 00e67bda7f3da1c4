//! Temperature sensors

pub mod dht22;

pub use dht22::{Dht22, Dht22Reading};
