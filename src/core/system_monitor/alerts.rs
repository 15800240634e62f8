//! Threshold evaluation.
//!
//! Classifies a finished snapshot against the configured thresholds. Pure:
//! no I/O, no retained state, safe to call from any thread.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::metrics::SystemMetrics;

/// Warning/critical pair for one monitored quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThreshold {
    pub warning: f32,
    pub critical: f32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl AlertThreshold {
    pub const fn new(warning: f32, critical: f32) -> Self {
        Self {
            warning,
            critical,
            enabled: true,
        }
    }

    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// The monitored quantities, one threshold each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    CpuUsage,
    CpuTemp,
    GpuUsage,
    GpuTemp,
    RamUsage,
}

impl Quantity {
    pub const ALL: [Quantity; 5] = [
        Quantity::CpuUsage,
        Quantity::CpuTemp,
        Quantity::GpuUsage,
        Quantity::GpuTemp,
        Quantity::RamUsage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::CpuUsage => "cpu_usage",
            Quantity::CpuTemp => "cpu_temp",
            Quantity::GpuUsage => "gpu_usage",
            Quantity::GpuTemp => "gpu_temp",
            Quantity::RamUsage => "ram_usage",
        }
    }
}

/// Alert configuration with thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub cpu_usage: AlertThreshold, // %
    pub cpu_temp: AlertThreshold,  // °C
    pub gpu_usage: AlertThreshold, // %
    pub gpu_temp: AlertThreshold,  // °C
    pub ram_usage: AlertThreshold, // %
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cpu_usage: AlertThreshold::new(80.0, 95.0),
            cpu_temp: AlertThreshold::new(70.0, 85.0),
            gpu_usage: AlertThreshold::new(80.0, 95.0),
            gpu_temp: AlertThreshold::new(75.0, 90.0),
            ram_usage: AlertThreshold::new(80.0, 95.0),
        }
    }
}

impl AlertConfig {
    pub fn threshold(&self, quantity: Quantity) -> &AlertThreshold {
        match quantity {
            Quantity::CpuUsage => &self.cpu_usage,
            Quantity::CpuTemp => &self.cpu_temp,
            Quantity::GpuUsage => &self.gpu_usage,
            Quantity::GpuTemp => &self.gpu_temp,
            Quantity::RamUsage => &self.ram_usage,
        }
    }

    pub fn threshold_mut(&mut self, quantity: Quantity) -> &mut AlertThreshold {
        match quantity {
            Quantity::CpuUsage => &mut self.cpu_usage,
            Quantity::CpuTemp => &mut self.cpu_temp,
            Quantity::GpuUsage => &mut self.gpu_usage,
            Quantity::GpuTemp => &mut self.gpu_temp,
            Quantity::RamUsage => &mut self.ram_usage,
        }
    }
}

/// Ordered severity: `None < Warning < Critical`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    #[default]
    None,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::None => "ok",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Severity per resource group for one snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityState {
    pub cpu: Severity,
    pub ram: Severity,
    /// Worst across all GPUs
    pub gpu: Severity,
}

impl SeverityState {
    pub fn worst(&self) -> Severity {
        self.cpu.max(self.ram).max(self.gpu)
    }
}

/// Classify a single value. Both boundaries are inclusive and critical is
/// checked first, so `value == critical` is Critical even when
/// `warning == critical`.
pub fn check_threshold(value: f32, threshold: &AlertThreshold) -> Severity {
    if !threshold.enabled {
        return Severity::None;
    }
    if value >= threshold.critical {
        Severity::Critical
    } else if value >= threshold.warning {
        Severity::Warning
    } else {
        Severity::None
    }
}

/// Temperature severity, ignoring the "unavailable" sentinel.
fn check_temperature(celsius: f32, threshold: &AlertThreshold) -> Severity {
    if celsius < 0.0 {
        return Severity::None;
    }
    check_threshold(celsius, threshold)
}

/// Evaluate a snapshot against the thresholds
pub fn evaluate(metrics: &SystemMetrics, config: &AlertConfig) -> SeverityState {
    let cpu_usage = check_threshold(metrics.cpu.usage_percent, &config.cpu_usage);
    let cpu_temp = check_temperature(metrics.cpu.temperature_celsius, &config.cpu_temp);

    let gpu = metrics
        .gpus
        .iter()
        .map(|gpu| {
            let usage = check_threshold(gpu.usage_percent, &config.gpu_usage);
            let temp = check_temperature(gpu.temperature_celsius, &config.gpu_temp);
            usage.max(temp)
        })
        .max()
        .unwrap_or_default();

    SeverityState {
        cpu: cpu_usage.max(cpu_temp),
        ram: check_threshold(metrics.ram.usage_percent, &config.ram_usage),
        gpu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::system_monitor::{CpuMetric, GpuMetric, GpuVendor, RamMetric};

    fn gpu(usage: f32, temp: f32) -> GpuMetric {
        GpuMetric {
            usage_percent: usage,
            temperature_celsius: temp,
            ..GpuMetric::unmeasured("test", GpuVendor::Unknown)
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let threshold = AlertThreshold::new(80.0, 95.0);
        assert_eq!(check_threshold(79.9, &threshold), Severity::None);
        assert_eq!(check_threshold(80.0, &threshold), Severity::Warning);
        assert_eq!(check_threshold(94.9, &threshold), Severity::Warning);
        assert_eq!(check_threshold(95.0, &threshold), Severity::Critical);
    }

    #[test]
    fn test_equal_warning_and_critical_yields_critical() {
        let threshold = AlertThreshold::new(50.0, 50.0);
        assert_eq!(check_threshold(50.0, &threshold), Severity::Critical);
        assert_eq!(check_threshold(49.0, &threshold), Severity::None);
    }

    #[test]
    fn test_disabled_threshold_is_silent() {
        let threshold = AlertThreshold::new(10.0, 20.0).disabled();
        assert_eq!(check_threshold(1.0e9, &threshold), Severity::None);
    }

    #[test]
    fn test_nan_is_not_alerting() {
        let threshold = AlertThreshold::new(10.0, 20.0);
        assert_eq!(check_threshold(f32::NAN, &threshold), Severity::None);
    }

    #[test]
    fn test_cpu_takes_worst_of_usage_and_temperature() {
        let config = AlertConfig::default();
        let metrics = SystemMetrics {
            cpu: CpuMetric {
                usage_percent: 10.0,
                temperature_celsius: 90.0,
                core_count: 4,
            },
            ..Default::default()
        };
        assert_eq!(evaluate(&metrics, &config).cpu, Severity::Critical);
    }

    #[test]
    fn test_unavailable_cpu_temperature_is_ignored() {
        let mut config = AlertConfig::default();
        // A threshold at or below -1 would fire on the sentinel if it were not excluded
        config.cpu_temp = AlertThreshold::new(-5.0, -2.0);
        let metrics = SystemMetrics::default();
        assert_eq!(evaluate(&metrics, &config).cpu, Severity::None);
    }

    #[test]
    fn test_gpu_composite_is_worst_device() {
        let config = AlertConfig::default();
        let metrics = SystemMetrics {
            gpus: vec![gpu(85.0, -1.0), gpu(10.0, 91.0)],
            ..Default::default()
        };
        assert_eq!(evaluate(&metrics, &config).gpu, Severity::Critical);
    }

    #[test]
    fn test_no_gpus_is_none() {
        let state = evaluate(&SystemMetrics::default(), &AlertConfig::default());
        assert_eq!(state.gpu, Severity::None);
    }

    #[test]
    fn test_ram_uses_usage_percent() {
        let metrics = SystemMetrics {
            ram: RamMetric {
                used_bytes: 81,
                total_bytes: 100,
                usage_percent: 81.0,
            },
            ..Default::default()
        };
        let state = evaluate(&metrics, &AlertConfig::default());
        assert_eq!(state.ram, Severity::Warning);
        assert_eq!(state.worst(), Severity::Warning);
    }

    #[test]
    fn test_severity_ordering_and_labels() {
        assert!(Severity::None < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert_eq!(Severity::Critical.to_string(), "critical");
    }

    #[test]
    fn test_threshold_lookup_by_quantity() {
        let mut config = AlertConfig::default();
        config.threshold_mut(Quantity::GpuTemp).enabled = false;
        assert!(!config.threshold(Quantity::GpuTemp).enabled);
        assert_eq!(Quantity::ALL.len(), 5);
        assert_eq!(Quantity::RamUsage.name(), "ram_usage");
    }
}
