use std::path::Path;

use crate::core::system_monitor::{GpuMetric, GpuProbe, GpuVendor};
use crate::platform::sysfs;

use super::drm::{self, DrmDevice, PCI_VENDOR_INTEL};

const INTEL_GPU_NAME: &str = "Intel Graphics";

/// Intel GPU probe (i915/xe via sysfs)
///
/// There is no public utilization counter and the memory is shared with the
/// system, so only the temperature is ever measured.
pub struct IntelGpuProbe {
    devices: Vec<DrmDevice>,
}

impl IntelGpuProbe {
    pub fn new() -> Self {
        Self::with_root(Path::new("/"))
    }

    pub fn with_root(root: &Path) -> Self {
        Self {
            devices: drm::scan(root, PCI_VENDOR_INTEL),
        }
    }
}

impl Default for IntelGpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuProbe for IntelGpuProbe {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Intel
    }

    fn is_available(&self) -> bool {
        !self.devices.is_empty()
    }

    fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn collect(&mut self) -> Vec<GpuMetric> {
        self.devices
            .iter()
            .map(|device| {
                let mut metric = GpuMetric::unmeasured(INTEL_GPU_NAME, GpuVendor::Intel);
                let temperature = device
                    .temp_path
                    .as_deref()
                    .and_then(sysfs::read_millidegrees);
                if let Some(celsius) = temperature {
                    metric.temperature_celsius = celsius;
                }
                metric
            })
            .collect()
    }
}
