use std::fs;
use std::path::{Path, PathBuf};

use crate::core::system_monitor::{CpuMetric, CpuSampleState, CpuTicks, TEMPERATURE_UNAVAILABLE};
use crate::platform::sysfs;

/// hwmon driver names that report a CPU package/die temperature
const CPU_HWMON_NAMES: [&str; 4] = ["coretemp", "k10temp", "zenpower", "cpu_thermal"];
/// Substrings of `thermal_zone*/type` that identify a CPU zone
const CPU_THERMAL_ZONE_TYPES: [&str; 3] = ["cpu", "x86", "acpi"];
const MAX_THERMAL_ZONES: usize = 10;

/// CPU collector backed by `/proc/stat` and hwmon/thermal sysfs
pub struct CpuCollector {
    root: PathBuf,
    state: CpuSampleState,
    core_count: usize,
}

impl CpuCollector {
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Read `proc/` and `sys/` below `root` instead of the real filesystem root
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            state: CpuSampleState::new(),
            core_count: crate::platform::system::core_count(),
        }
    }

    pub fn collect(&mut self) -> CpuMetric {
        let usage_percent = match read_cpu_ticks(&self.root.join("proc/stat")) {
            Some(ticks) => self.state.advance(ticks),
            None => {
                log::debug!("/proc/stat unreadable, reporting 0% CPU this cycle");
                0.0
            }
        };

        CpuMetric {
            usage_percent,
            temperature_celsius: read_temperature(&self.root).unwrap_or(TEMPERATURE_UNAVAILABLE),
            core_count: self.core_count,
        }
    }
}

impl Default for CpuCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate `cpu` line of /proc/stat: idle = idle + iowait, total = the eight
/// counters user..steal (missing trailing fields count as 0).
fn read_cpu_ticks(path: &Path) -> Option<CpuTicks> {
    let contents = fs::read_to_string(path).ok()?;
    parse_cpu_line(contents.lines().next()?)
}

fn parse_cpu_line(line: &str) -> Option<CpuTicks> {
    let mut fields = line.split_whitespace();
    if fields.next()? != "cpu" {
        return None;
    }

    let mut values = [0u64; 8];
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = field.parse().ok()?;
    }

    // user nice system idle iowait irq softirq steal
    let idle = values[3].saturating_add(values[4]);
    let total = values.iter().fold(0u64, |acc, v| acc.saturating_add(*v));
    Some(CpuTicks { idle, total })
}

fn read_temperature(root: &Path) -> Option<f32> {
    read_hwmon_temperature(root).or_else(|| read_thermal_zone_temperature(root))
}

/// First hwmon device with a known CPU driver name; only its `temp1_input` is read.
fn read_hwmon_temperature(root: &Path) -> Option<f32> {
    let hwmon_root = root.join("sys/class/hwmon");
    sysfs::list_dir(&hwmon_root).into_iter().find_map(|entry| {
        let dir = hwmon_root.join(entry);
        let name = sysfs::read_string(&dir.join("name"))?;
        if !CPU_HWMON_NAMES.contains(&name.as_str()) {
            return None;
        }
        sysfs::read_sensor_millidegrees(&dir.join("temp1_input"))
    })
}

fn read_thermal_zone_temperature(root: &Path) -> Option<f32> {
    let thermal_root = root.join("sys/class/thermal");
    (0..MAX_THERMAL_ZONES).find_map(|i| {
        let zone = thermal_root.join(format!("thermal_zone{i}"));
        let zone_type = sysfs::read_string(&zone.join("type"))?;
        if !CPU_THERMAL_ZONE_TYPES
            .iter()
            .any(|needle| zone_type.contains(needle))
        {
            return None;
        }
        sysfs::read_sensor_millidegrees(&zone.join("temp"))
    })
}
