//! Simple TOML parser for the incubator configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `incubator.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, hex integer, one-decimal number)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys

use super::types::{ConfigError, IncubatorConfig, SensorPolicy};
use crate::menu::field::DateTimeField;

/// Parse failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    MissingEquals,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// The parsed configuration failed validation
    Validation(ConfigError),
}

/// Parse error with the 1-based line it occurred on
///
/// Validation errors refer to the whole file and carry line 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: u16,
    pub kind: ParseErrorKind,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Defaults,
    Input,
    Alarm,
    Sensor,
    Loop,
    Hardware,
}

/// Parse TOML configuration into IncubatorConfig
///
/// Keys that are not present keep their default values. The result is
/// validated before it is returned.
pub fn parse_config(input: &str) -> Result<IncubatorConfig, ParseError> {
    let mut config = IncubatorConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let err = |kind| ParseError {
            line: line_no,
            kind,
        };

        let line = strip_comment(raw).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if let Some(header) = line.strip_prefix('[') {
            let header = header
                .strip_suffix(']')
                .ok_or(err(ParseErrorKind::InvalidSection))?;
            section = parse_section_header(header).ok_or(err(ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(err(ParseErrorKind::MissingEquals))?;

        apply_value(section, key.trim(), value.trim(), &mut config).map_err(err)?;
    }

    config.validate().map_err(|e| ParseError {
        line: 0,
        kind: ParseErrorKind::Validation(e),
    })?;

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "defaults" => Some(Section::Defaults),
        "input" => Some(Section::Input),
        "alarm" => Some(Section::Alarm),
        "sensor" => Some(Section::Sensor),
        "loop" => Some(Section::Loop),
        "hardware" => Some(Section::Hardware),
        _ => None,
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut IncubatorConfig,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Defaults, "target_temp") => {
            config.defaults.target_temp_x10 = parse_decimal_x10(value)?;
        }
        (Section::Defaults, "start") => {
            config.defaults.start = parse_date_time(value)?;
        }
        (Section::Defaults, "hatch") => {
            config.defaults.hatch = parse_date_time(value)?;
        }

        (Section::Input, "debounce_ms") => config.input.debounce_ms = parse_int(value)?,
        (Section::Input, "repeat_ms") => config.input.repeat_ms = parse_int(value)?,

        (Section::Alarm, "repeat_interval_ms") => {
            config.alarm.repeat_interval_ms = parse_int(value)?;
        }
        (Section::Alarm, "pulse_ms") => config.alarm.pulse_ms = parse_int(value)?,
        (Section::Alarm, "tone_hz") => config.alarm.tone_hz = parse_int(value)?,

        (Section::Sensor, "policy") => {
            config.sensor.policy =
                SensorPolicy::from_name(parse_string(value)?).ok_or(ParseErrorKind::InvalidValue)?;
        }
        (Section::Sensor, "max_stale_reads") => {
            config.sensor.max_stale_reads = narrow(parse_int(value)?)?;
        }
        (Section::Sensor, "min_read_interval_ms") => {
            config.sensor.min_read_interval_ms = parse_int(value)?;
        }

        (Section::Loop, "tick_ms") => config.control_loop.tick_ms = parse_int(value)?,

        (Section::Hardware, "lcd_address") => {
            config.hardware.lcd_address = narrow(parse_int(value)?)?;
        }
        (Section::Hardware, "rtc_address") => {
            config.hardware.rtc_address = narrow(parse_int(value)?)?;
        }

        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

/// Remove a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseErrorKind> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseErrorKind::InvalidValue)
}

/// Parse a non-negative decimal or `0x` hexadecimal integer
///
/// Underscores between digits are allowed, as in TOML.
fn parse_int(value: &str) -> Result<u32, ParseErrorKind> {
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return Err(ParseErrorKind::InvalidValue);
    }

    let mut result: u32 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix).ok_or(ParseErrorKind::InvalidValue)?;
        result = result
            .checked_mul(radix)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseErrorKind::InvalidValue)?;
    }
    Ok(result)
}

fn narrow<T: TryFrom<u32>>(value: u32) -> Result<T, ParseErrorKind> {
    T::try_from(value).map_err(|_| ParseErrorKind::InvalidValue)
}

/// Parse a number with at most one decimal place into tenths
///
/// `37.5` → 375, `38` → 380, `-1.5` → -15.
fn parse_decimal_x10(value: &str) -> Result<i16, ParseErrorKind> {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let (whole, frac) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, "0"),
    };

    if whole.is_empty() || frac.len() != 1 {
        return Err(ParseErrorKind::InvalidValue);
    }

    let whole = parse_int(whole)?;
    let frac = frac
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or(ParseErrorKind::InvalidValue)?;

    let magnitude = whole
        .checked_mul(10)
        .and_then(|w| w.checked_add(frac))
        .and_then(|v| i16::try_from(v).ok())
        .ok_or(ParseErrorKind::InvalidValue)?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_date_time(value: &str) -> Result<DateTimeField, ParseErrorKind> {
    DateTimeField::parse(parse_string(value)?).ok_or(ParseErrorKind::InvalidValue)
}
