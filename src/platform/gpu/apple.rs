//! Display registry probe for macOS.
//!
//! The registry is read once through `system_profiler SPDisplaysDataType -json`
//! and every listed device is classified and reported. No public API exposes
//! utilization, VRAM in use or temperature for these devices.

use std::process::Command;

use serde::Deserialize;

use crate::core::system_monitor::{GpuMetric, GpuProbe, GpuVendor};
use crate::error::{ResmonError, Result};
use crate::platform::sysfs;

use super::classify::{classify, normalize_apple_name, parse_vram, RegistryEntry};

#[derive(Debug, Deserialize)]
struct DisplaysReport {
    #[serde(rename = "SPDisplaysDataType", default)]
    displays: Vec<DisplayDevice>,
}

#[derive(Debug, Deserialize)]
struct DisplayDevice {
    #[serde(rename = "_name", default)]
    name: Option<String>,
    #[serde(rename = "sppci_model", default)]
    model: Option<String>,
    #[serde(rename = "spdisplays_vendor", default)]
    vendor: Option<String>,
    #[serde(rename = "spdisplays_vendor-id", default)]
    vendor_id: Option<String>,
    /// Dedicated VRAM only; `spdisplays_vram_shared` is system memory
    #[serde(rename = "spdisplays_vram", default)]
    vram: Option<String>,
}

/// Pull `0x1002` out of strings like `ATI (0x1002)`.
fn vendor_id_from(text: &str) -> Option<u32> {
    let start = text.find("0x")?;
    let hex: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    sysfs::parse_hex_id(&hex)
}

impl DisplayDevice {
    fn into_entry(self) -> RegistryEntry {
        let class_name = self.vendor.clone().unwrap_or_default();
        let vendor_id = self
            .vendor_id
            .as_deref()
            .and_then(vendor_id_from)
            .or_else(|| self.vendor.as_deref().and_then(vendor_id_from));
        let vram_bytes = self.vram.as_deref().and_then(parse_vram).unwrap_or(0);

        RegistryEntry {
            class_name,
            model: self.model.or(self.name).unwrap_or_default(),
            vendor_id,
            vram_bytes,
        }
    }
}

/// Parse the JSON printed by `system_profiler SPDisplaysDataType -json`.
pub fn parse_displays_json(json: &str) -> Result<Vec<RegistryEntry>> {
    let report: DisplaysReport = serde_json::from_str(json)?;
    Ok(report
        .displays
        .into_iter()
        .map(DisplayDevice::into_entry)
        .collect())
}

fn query_display_registry() -> Result<Vec<RegistryEntry>> {
    let output = Command::new("system_profiler")
        .args(["SPDisplaysDataType", "-json"])
        .output()
        .map_err(|e| ResmonError::registry(format!("system_profiler execution failed: {e}")))?;

    if !output.status.success() {
        return Err(ResmonError::registry(format!(
            "system_profiler exited with {}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_displays_json(&stdout)
        .map_err(|e| ResmonError::registry(format!("display registry parsing failed: {e}")))
}

/// Turn a registry entry into the metric reported every cycle.
fn entry_metric(entry: &RegistryEntry) -> GpuMetric {
    let vendor = classify(entry);
    let name = match vendor {
        GpuVendor::Apple => normalize_apple_name(&entry.model),
        _ if entry.model.trim().is_empty() => format!("{} GPU", vendor),
        _ => entry.model.trim().to_string(),
    };

    GpuMetric {
        vram_total_bytes: entry.vram_bytes,
        ..GpuMetric::unmeasured(name, vendor)
    }
}

/// GPU probe backed by the display registry
pub struct RegistryGpuProbe {
    devices: Vec<GpuMetric>,
}

impl RegistryGpuProbe {
    /// Query the registry once; a failed query leaves the probe empty.
    pub fn new() -> Self {
        match query_display_registry() {
            Ok(entries) => Self::from_entries(&entries),
            Err(e) => {
                log::warn!("Display registry unavailable: {}", e);
                Self::from_entries(&[])
            }
        }
    }

    pub fn from_entries(entries: &[RegistryEntry]) -> Self {
        Self {
            devices: entries.iter().map(entry_metric).collect(),
        }
    }
}

impl Default for RegistryGpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuProbe for RegistryGpuProbe {
    /// Vendor of the first device, `Apple` on an empty registry
    fn vendor(&self) -> GpuVendor {
        self.devices
            .first()
            .map(|gpu| gpu.vendor)
            .unwrap_or(GpuVendor::Apple)
    }

    fn is_available(&self) -> bool {
        !self.devices.is_empty()
    }

    fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn collect(&mut self) -> Vec<GpuMetric> {
        self.devices.clone()
    }
}
