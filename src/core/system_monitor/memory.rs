//! Conversion of raw memory figures into a [`RamMetric`].

use super::metrics::{clamp_percent, RamMetric};

/// Raw memory figures in bytes, already reduced to total + used by the OS collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryReading {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

impl MemoryReading {
    /// `used = total - available`, saturating at zero.
    pub fn from_available(total_bytes: u64, available_bytes: u64) -> Self {
        Self {
            total_bytes,
            used_bytes: total_bytes.saturating_sub(available_bytes),
        }
    }

    /// Build the public metric. `used` is capped at `total` and the percentage
    /// is 0 when the total is unknown.
    pub fn into_metric(self) -> RamMetric {
        let used_bytes = if self.total_bytes > 0 {
            self.used_bytes.min(self.total_bytes)
        } else {
            self.used_bytes
        };

        let usage_percent = if self.total_bytes > 0 {
            clamp_percent(used_bytes as f64 / self.total_bytes as f64 * 100.0)
        } else {
            0.0
        };

        RamMetric {
            used_bytes,
            total_bytes: self.total_bytes,
            usage_percent,
        }
    }
}
