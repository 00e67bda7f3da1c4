//! Configuration loading
//!
//! The configuration is compiled in from `incubator.toml`. The build
//! script has already validated it; a parse failure here means the core
//! parser and the build-time check disagree.

use defmt::*;

use brooder_core::config::{parse_config, IncubatorConfig};

/// Embedded configuration (compiled into firmware)
/// Edit incubator.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../incubator.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> IncubatorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config loaded: target={} tick={}ms policy={}",
                config.defaults.target_temp_x10,
                config.control_loop.tick_ms,
                config.sensor.policy
            );
            config
        }
        Err(e) => {
            error!(
                "incubator.toml line {}: {}, using defaults",
                e.line, e.kind
            );
            IncubatorConfig::default()
        }
    }
}
