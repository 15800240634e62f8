//! Small readers for procfs/sysfs style pseudo-files.
//!
//! Every helper returns `None` on a missing or malformed file; callers turn that
//! into the sentinel for the one field they were reading.

use std::fs;
use std::path::{Path, PathBuf};

/// Read a single-line value, trimmed. Empty files count as missing.
pub fn read_string(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| log::trace!("{}: {}", path.display(), e))
        .ok()?;
    let value = raw.lines().next().unwrap_or("").trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Read a signed integer value (sysfs reports some counters as signed).
pub fn read_i64(path: &Path) -> Option<i64> {
    let value = read_string(path)?;
    value
        .parse()
        .map_err(|e| log::trace!("{}: unparseable {:?}: {}", path.display(), value, e))
        .ok()
}

/// Read a millidegree sensor file as °C, whatever value it holds.
pub fn read_sensor_millidegrees(path: &Path) -> Option<f32> {
    read_i64(path).map(|value| value as f32 / 1000.0)
}

/// Read a millidegree temperature file and convert to °C.
///
/// Non-positive readings are treated as "no reading".
pub fn read_millidegrees(path: &Path) -> Option<f32> {
    read_sensor_millidegrees(path).filter(|celsius| *celsius > 0.0)
}

/// Sorted names of the entries in `dir`; empty if the directory cannot be read.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    names
}

/// Resolve `<device>/hwmon/hwmon*/temp1_input`.
///
/// Only the first candidate file name is checked in each hwmon directory; a
/// device without it reports no temperature.
pub fn find_hwmon_temp_input(device_dir: &Path) -> Option<PathBuf> {
    let hwmon_dir = device_dir.join("hwmon");
    list_dir(&hwmon_dir)
        .into_iter()
        .filter(|name| name.starts_with("hwmon"))
        .map(|name| hwmon_dir.join(name).join("temp1_input"))
        .find(|path| path.is_file())
}

/// Parse a PCI vendor id written as `0x10de`.
pub fn parse_hex_id(value: &str) -> Option<u32> {
    let digits = value
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u32::from_str_radix(digits, 16).ok()
}
