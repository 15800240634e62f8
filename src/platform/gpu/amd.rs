use std::path::Path;

use crate::core::system_monitor::{GpuMetric, GpuProbe, GpuVendor, TEMPERATURE_UNAVAILABLE};
use crate::platform::sysfs;

use super::drm::{self, DrmDevice, PCI_VENDOR_AMD};

struct AmdDevice {
    drm: DrmDevice,
    name: String,
}

/// AMD GPU probe using the amdgpu sysfs interface
///
/// Every field is read from its own file; a missing file only blanks that field.
pub struct AmdGpuProbe {
    devices: Vec<AmdDevice>,
}

impl AmdGpuProbe {
    /// Scan `/sys/class/drm` for AMD cards
    pub fn new() -> Self {
        Self::with_root(Path::new("/"))
    }

    pub fn with_root(root: &Path) -> Self {
        let devices = drm::scan(root, PCI_VENDOR_AMD)
            .into_iter()
            .map(|drm| {
                let name = sysfs::read_string(&drm.file("product_name"))
                    .unwrap_or_else(|| "AMD GPU".to_string());
                AmdDevice { drm, name }
            })
            .collect();

        Self { devices }
    }

    fn read_device(device: &AmdDevice) -> GpuMetric {
        let busy = sysfs::read_i64(&device.drm.file("gpu_busy_percent"))
            .filter(|v| (0..=100).contains(v))
            .unwrap_or(0);

        let temperature = device
            .drm
            .temp_path
            .as_deref()
            .and_then(sysfs::read_millidegrees)
            .unwrap_or(TEMPERATURE_UNAVAILABLE);

        let read_bytes = |file: &str| {
            sysfs::read_i64(&device.drm.file(file))
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(0)
        };

        GpuMetric {
            name: device.name.clone(),
            vendor: GpuVendor::Amd,
            usage_percent: busy as f32,
            temperature_celsius: temperature,
            vram_used_bytes: read_bytes("mem_info_vram_used"),
            vram_total_bytes: read_bytes("mem_info_vram_total"),
        }
    }
}

impl Default for AmdGpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuProbe for AmdGpuProbe {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Amd
    }

    fn is_available(&self) -> bool {
        !self.devices.is_empty()
    }

    fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn collect(&mut self) -> Vec<GpuMetric> {
        self.devices.iter().map(Self::read_device).collect()
    }
}
