#[cfg(feature = "nvml")]
use std::ffi::OsStr;

#[cfg(feature = "nvml")]
use nvml_wrapper::{enum_wrappers::device::TemperatureSensor, error::NvmlError, Nvml};

use crate::core::system_monitor::{GpuMetric, GpuProbe, GpuVendor};
#[cfg(feature = "nvml")]
use crate::error::{ResmonError, Result};

/// Library names tried in order when opening NVML
pub const NVML_LIBRARY_CANDIDATES: [&str; 2] = ["libnvidia-ml.so.1", "libnvidia-ml.so"];

#[cfg(feature = "nvml")]
const NVIDIA_GPU_NAME: &str = "NVIDIA GPU";

/// NVML capability handle
///
/// `Ready` only exists once the library was loaded, `nvmlInit_v2` succeeded, the
/// device count could be read and every entry point used per cycle resolved
/// (checked on the first device). Anything else is `Unavailable` for the rest
/// of the process. Dropping a `Ready` handle runs `nvmlShutdown` and unloads
/// the library; an `Unavailable` handle never calls into NVML.
pub enum NvmlHandle {
    #[cfg(feature = "nvml")]
    Ready { nvml: Nvml, device_count: u32 },
    Unavailable,
}

impl NvmlHandle {
    /// Try each library candidate in order; the first that initializes wins.
    pub fn open(candidates: &[&str]) -> Self {
        #[cfg(feature = "nvml")]
        {
            for candidate in candidates {
                match Self::open_library(candidate) {
                    Ok(handle) => return handle,
                    Err(e) => log::debug!("{}", e),
                }
            }
            NvmlHandle::Unavailable
        }
        #[cfg(not(feature = "nvml"))]
        {
            let _ = candidates;
            log::debug!("NVIDIA GPU support not enabled");
            NvmlHandle::Unavailable
        }
    }

    #[cfg(feature = "nvml")]
    fn open_library(path: &str) -> Result<Self> {
        let nvml = Nvml::builder()
            .lib_path(OsStr::new(path))
            .init()
            .map_err(|e| {
                ResmonError::gpu_not_available(format!("Failed to init NVML from {}: {}", path, e))
            })?;

        // Dropping an Nvml without nvmlShutdown panics, so leak it instead
        #[allow(unused_unsafe)]
        let has_shutdown = unsafe { nvml.lib() }.nvmlShutdown.is_ok();
        if !has_shutdown {
            std::mem::forget(nvml);
            return Err(ResmonError::gpu_not_available(format!(
                "{} has no nvmlShutdown entry point",
                path
            )));
        }

        let device_count = nvml.device_count().map_err(|e| {
            ResmonError::gpu_not_available(format!("NVML device count failed: {}", e))
        })?;
        Self::check_device_entry_points(&nvml, device_count)?;

        Ok(NvmlHandle::Ready { nvml, device_count })
    }

    /// Symbols resolve lazily, so call every getter once on the first device.
    #[cfg(feature = "nvml")]
    fn check_device_entry_points(nvml: &Nvml, device_count: u32) -> Result<()> {
        if device_count == 0 {
            return Ok(());
        }

        if let Some(device) = require_symbol("device_by_index", nvml.device_by_index(0))? {
            require_symbol("name", device.name())?;
            require_symbol("utilization_rates", device.utilization_rates())?;
            require_symbol("temperature", device.temperature(TemperatureSensor::Gpu))?;
            require_symbol("memory_info", device.memory_info())?;
        }
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        !matches!(self, NvmlHandle::Unavailable)
    }

    pub fn device_count(&self) -> u32 {
        match self {
            #[cfg(feature = "nvml")]
            NvmlHandle::Ready { device_count, .. } => *device_count,
            NvmlHandle::Unavailable => 0,
        }
    }

    /// Run `nvmlShutdown` and unload, for a handle that was initialized.
    pub fn shutdown(self) {
        match self {
            #[cfg(feature = "nvml")]
            NvmlHandle::Ready { nvml, .. } => {
                if let Err(e) = nvml.shutdown() {
                    log::warn!("NVML shutdown failed: {}", e);
                }
            }
            NvmlHandle::Unavailable => {}
        }
    }
}

/// A missing entry point disables NVML; any other error only blanks that field.
#[cfg(feature = "nvml")]
fn require_symbol<T>(
    call: &str,
    result: std::result::Result<T, NvmlError>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(NvmlError::FailedToLoadSymbol(symbol)) => Err(ResmonError::gpu_not_available(
            format!("NVML {} entry point missing: {}", call, symbol),
        )),
        Err(e) => {
            log::debug!("NVML {} not usable on device 0: {}", call, e);
            Ok(None)
        }
    }
}

/// NVIDIA GPU probe using NVML, loaded at runtime
pub struct NvidiaGpuProbe {
    handle: NvmlHandle,
}

impl NvidiaGpuProbe {
    pub fn new() -> Self {
        Self::with_library_candidates(&NVML_LIBRARY_CANDIDATES)
    }

    pub fn with_library_candidates(candidates: &[&str]) -> Self {
        let handle = NvmlHandle::open(candidates);
        if handle.is_ready() {
            log::info!("NVML ready, {} NVIDIA device(s)", handle.device_count());
        }
        Self { handle }
    }

    #[cfg(feature = "nvml")]
    fn read_device(nvml: &Nvml, index: u32) -> Option<GpuMetric> {
        let device = nvml
            .device_by_index(index)
            .map_err(|e| log::debug!("NVIDIA device {} unavailable this cycle: {}", index, e))
            .ok()?;

        let mut metric = GpuMetric::unmeasured(
            device.name().unwrap_or_else(|_| NVIDIA_GPU_NAME.to_string()),
            GpuVendor::Nvidia,
        );

        if let Ok(utilization) = device.utilization_rates() {
            metric.usage_percent = utilization.gpu.min(100) as f32;
        }

        if let Ok(temperature) = device.temperature(TemperatureSensor::Gpu) {
            metric.temperature_celsius = temperature as f32;
        }

        if let Ok(memory) = device.memory_info() {
            metric.vram_used_bytes = memory.used;
            metric.vram_total_bytes = memory.total;
        }

        Some(metric)
    }
}

impl Default for NvidiaGpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NvidiaGpuProbe {
    fn drop(&mut self) {
        std::mem::replace(&mut self.handle, NvmlHandle::Unavailable).shutdown();
    }
}

impl GpuProbe for NvidiaGpuProbe {
    fn vendor(&self) -> GpuVendor {
        GpuVendor::Nvidia
    }

    fn is_available(&self) -> bool {
        self.handle.is_ready()
    }

    fn device_count(&self) -> usize {
        self.handle.device_count() as usize
    }

    fn collect(&mut self) -> Vec<GpuMetric> {
        match &self.handle {
            #[cfg(feature = "nvml")]
            NvmlHandle::Ready { nvml, device_count } => (0..*device_count)
                .filter_map(|index| Self::read_device(nvml, index))
                .collect(),
            NvmlHandle::Unavailable => Vec::new(),
        }
    }
}
