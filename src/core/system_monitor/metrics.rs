use std::fmt;

use serde::{Deserialize, Serialize};

/// Temperature sentinel meaning "no sensor reading", never "0 degrees".
pub const TEMPERATURE_UNAVAILABLE: f32 = -1.0;

/// Complete system metrics snapshot
///
/// A fresh value is produced by every collection cycle; nothing mutates a
/// snapshot after the backend returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub cpu: CpuMetric,
    pub ram: RamMetric,
    pub gpus: Vec<GpuMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuMetric {
    pub usage_percent: f32,
    pub temperature_celsius: f32,
    pub core_count: usize,
}

impl CpuMetric {
    pub fn has_temperature(&self) -> bool {
        self.temperature_celsius >= 0.0
    }
}

impl Default for CpuMetric {
    fn default() -> Self {
        Self {
            usage_percent: 0.0,
            temperature_celsius: TEMPERATURE_UNAVAILABLE,
            core_count: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RamMetric {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub usage_percent: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuMetric {
    pub name: String,
    pub vendor: GpuVendor,
    pub usage_percent: f32,
    pub temperature_celsius: f32,
    pub vram_used_bytes: u64,
    /// 0 when the device has no dedicated memory (integrated / unified).
    pub vram_total_bytes: u64,
}

impl GpuMetric {
    /// A record with every measurable field set to its sentinel.
    pub fn unmeasured(name: impl Into<String>, vendor: GpuVendor) -> Self {
        Self {
            name: name.into(),
            vendor,
            usage_percent: 0.0,
            temperature_celsius: TEMPERATURE_UNAVAILABLE,
            vram_used_bytes: 0,
            vram_total_bytes: 0,
        }
    }

    pub fn has_temperature(&self) -> bool {
        self.temperature_celsius >= 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GpuVendor {
    #[serde(rename = "NVIDIA")]
    Nvidia,
    #[serde(rename = "AMD")]
    Amd,
    Intel,
    Apple,
    #[default]
    Unknown,
}

impl GpuVendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            GpuVendor::Nvidia => "NVIDIA",
            GpuVendor::Amd => "AMD",
            GpuVendor::Intel => "Intel",
            GpuVendor::Apple => "Apple",
            GpuVendor::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a percentage computed in f64 into [0, 100] and narrow it to f32.
///
/// NaN maps to 0.
pub fn clamp_percent(value: f64) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0) as f32
}
