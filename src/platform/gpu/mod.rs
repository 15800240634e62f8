//! GPU-specific platform code.
//!
//! One probe per vendor access path: NVIDIA through NVML, AMD and Intel through
//! the DRM sysfs tree, and the display registry on macOS. Devices are
//! discovered when a probe is built and never re-scanned.

mod amd;
mod apple;
pub mod classify;
mod drm;
mod intel;
mod nvidia;

pub use amd::AmdGpuProbe;
pub use apple::{parse_displays_json, RegistryGpuProbe};
pub use intel::IntelGpuProbe;
pub use nvidia::{NvidiaGpuProbe, NvmlHandle, NVML_LIBRARY_CANDIDATES};

use std::path::Path;

use crate::core::system_monitor::GpuProbe;

/// Linux probes in collection order: NVIDIA, AMD, Intel.
pub fn linux_gpu_probes(root: &Path) -> Vec<Box<dyn GpuProbe>> {
    vec![
        Box::new(NvidiaGpuProbe::new()),
        Box::new(AmdGpuProbe::with_root(root)),
        Box::new(IntelGpuProbe::with_root(root)),
    ]
}

/// macOS has a single registry-backed probe.
pub fn macos_gpu_probes() -> Vec<Box<dyn GpuProbe>> {
    vec![Box::new(RegistryGpuProbe::new())]
}

pub fn log_probe_summary(probes: &[Box<dyn GpuProbe>]) {
    let total: usize = probes.iter().map(|probe| probe.device_count()).sum();

    for probe in probes {
        if probe.is_available() {
            log::info!(
                "{} GPU probe: {} device(s)",
                probe.vendor(),
                probe.device_count()
            );
        } else {
            log::debug!("{} GPU probe unavailable", probe.vendor());
        }
    }

    if total == 0 {
        log::info!("No GPUs detected; GPU metrics will be empty");
    }
}
