//! Build script for brooder-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates incubator.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const BOX_WIDTH: usize = 64;

fn main() {
    setup_linker();
    validate_config();
}

/// Copy memory.x next to the build output and pass the linker scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate incubator.toml so a bad edit fails the build, not the boot
fn validate_config() {
    println!("cargo:rerun-if-changed=incubator.toml");

    let path = Path::new("incubator.toml");
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read incubator.toml", &[e.to_string()]),
    };

    let config: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in incubator.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    for (name, section) in &config {
        let Some(table) = section.as_table() else {
            errors.push(format!("'{}' must be a [section]", name));
            continue;
        };
        match name.as_str() {
            "defaults" => validate_defaults(table, &mut errors),
            "input" => validate_input(table, &mut errors),
            "alarm" => validate_alarm(table, &mut errors),
            "sensor" => validate_sensor(table, &mut errors),
            "loop" => validate_loop(table, &mut errors),
            "hardware" => validate_hardware(table, &mut errors),
            other => errors.push(format!("unknown section [{}]", other)),
        }
    }

    if !errors.is_empty() {
        fail("Invalid configuration in incubator.toml", &errors);
    }

    println!("cargo:warning=incubator.toml validated successfully");
}

fn validate_defaults(t: &toml::Table, errors: &mut Vec<String>) {
    check_keys("defaults", t, &["target_temp", "start", "hatch"], errors);

    match t.get("target_temp") {
        Some(toml::Value::Float(v)) if *v < 0.0 => {
            errors.push("[defaults] target_temp must not be negative".into())
        }
        Some(toml::Value::Float(v)) if (v * 10.0).fract().abs() > 1e-6 => {
            errors.push("[defaults] target_temp takes at most one decimal place".into())
        }
        Some(toml::Value::Integer(v)) if *v < 0 => {
            errors.push("[defaults] target_temp must not be negative".into())
        }
        Some(toml::Value::Float(_)) | Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push("[defaults] target_temp must be a number".into()),
    }

    for key in ["start", "hatch"] {
        match t.get(key) {
            Some(toml::Value::String(s)) => {
                if let Err(e) = check_date_time(s) {
                    errors.push(format!("[defaults] {}: {}", key, e));
                }
            }
            Some(_) => errors.push(format!("[defaults] {} must be a \"DD/MM/YYYY : HH\" string", key)),
            None => {}
        }
    }
}

fn validate_input(t: &toml::Table, errors: &mut Vec<String>) {
    check_keys("input", t, &["debounce_ms", "repeat_ms"], errors);
    check_int("input", t, "debounce_ms", 0, u32::MAX as i64, errors);
    check_int("input", t, "repeat_ms", 0, u32::MAX as i64, errors);
}

fn validate_alarm(t: &toml::Table, errors: &mut Vec<String>) {
    check_keys("alarm", t, &["repeat_interval_ms", "pulse_ms", "tone_hz"], errors);
    let interval = check_int("alarm", t, "repeat_interval_ms", 1, u32::MAX as i64, errors)
        .unwrap_or(300_000);
    let pulse = check_int("alarm", t, "pulse_ms", 1, u32::MAX as i64, errors).unwrap_or(10_000);
    check_int("alarm", t, "tone_hz", 1, 20_000, errors);
    if pulse >= interval {
        errors.push("[alarm] pulse_ms must be shorter than repeat_interval_ms".into());
    }
}

fn validate_sensor(t: &toml::Table, errors: &mut Vec<String>) {
    check_keys(
        "sensor",
        t,
        &["policy", "max_stale_reads", "min_read_interval_ms"],
        errors,
    );
    match t.get("policy") {
        Some(toml::Value::String(p)) if ["hold_last", "fail_safe"].contains(&p.as_str()) => {}
        Some(_) => errors.push("[sensor] policy must be 'hold_last' or 'fail_safe'".into()),
        None => {}
    }
    check_int("sensor", t, "max_stale_reads", 0, u8::MAX as i64, errors);
    check_int("sensor", t, "min_read_interval_ms", 0, u32::MAX as i64, errors);
}

fn validate_loop(t: &toml::Table, errors: &mut Vec<String>) {
    check_keys("loop", t, &["tick_ms"], errors);
    check_int("loop", t, "tick_ms", 1, u32::MAX as i64, errors);
}

fn validate_hardware(t: &toml::Table, errors: &mut Vec<String>) {
    check_keys("hardware", t, &["lcd_address", "rtc_address"], errors);
    check_int("hardware", t, "lcd_address", 0, 0x7F, errors);
    check_int("hardware", t, "rtc_address", 0, 0x7F, errors);
}

fn check_keys(section: &str, t: &toml::Table, known: &[&str], errors: &mut Vec<String>) {
    for key in t.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

/// Check an optional integer key; returns its value when present and valid
fn check_int(
    section: &str,
    t: &toml::Table,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match t.get(key)? {
        toml::Value::Integer(v) if (min..=max).contains(v) => Some(*v),
        toml::Value::Integer(_) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        _ => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

/// Check the `DD/MM/YYYY : HH` menu format and field ranges
fn check_date_time(s: &str) -> Result<(), String> {
    let format = || "expected \"DD/MM/YYYY : HH\"".to_string();
    let (date, hour) = s.split_once(':').ok_or_else(format)?;
    let parts: Vec<&str> = date.trim().split('/').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format());
    }
    let num = |p: &str| p.trim().parse::<i64>().map_err(|_| format());
    let (day, month, _year, hour) = (num(parts[0])?, num(parts[1])?, num(parts[2])?, num(hour)?);

    if !(1..=31).contains(&day) {
        return Err("day must be 1-31".into());
    }
    if !(1..=12).contains(&month) {
        return Err("month must be 1-12".into());
    }
    if !(0..=24).contains(&hour) {
        return Err("hour must be 0-24".into());
    }
    Ok(())
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let rule = "═".repeat(BOX_WIDTH + 4);
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > BOX_WIDTH {
                format!("{}...", line.chars().take(BOX_WIDTH - 3).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  {:<w$}  ║", truncated, w = BOX_WIDTH)
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n╔{rule}╗\n║  {title:<w$}  ║\n╠{rule}╣\n{body}\n╚{rule}╝\n",
        rule = rule,
        title = title,
        body = body,
        w = BOX_WIDTH
    );
}
