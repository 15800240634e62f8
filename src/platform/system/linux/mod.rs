//! Linux backend: procfs for CPU/RAM, NVML + sysfs for GPUs.

mod cpu;
mod ram;

pub use cpu::CpuCollector;
pub use ram::{MemInfo, RamCollector};

use std::path::PathBuf;

use crate::core::system_monitor::{GpuProbe, MetricsBackend, SystemMetrics};
use crate::platform::gpu::{linux_gpu_probes, log_probe_summary};

pub struct LinuxBackend {
    cpu: CpuCollector,
    ram: RamCollector,
    /// Fixed order: NVIDIA, AMD, Intel
    gpu_probes: Vec<Box<dyn GpuProbe>>,
}

impl LinuxBackend {
    pub fn new() -> Self {
        Self::with_parts(
            CpuCollector::new(),
            RamCollector::new(),
            linux_gpu_probes(&PathBuf::from("/")),
        )
    }

    /// Build every filesystem reader against `root` (NVML is still loaded normally)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::with_parts(
            CpuCollector::with_root(&root),
            RamCollector::with_root(&root),
            linux_gpu_probes(&root),
        )
    }

    pub fn with_parts(
        cpu: CpuCollector,
        ram: RamCollector,
        gpu_probes: Vec<Box<dyn GpuProbe>>,
    ) -> Self {
        log_probe_summary(&gpu_probes);
        Self {
            cpu,
            ram,
            gpu_probes,
        }
    }

    pub fn gpu_probes(&self) -> &[Box<dyn GpuProbe>] {
        &self.gpu_probes
    }
}

impl Default for LinuxBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsBackend for LinuxBackend {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn collect(&mut self) -> SystemMetrics {
        let cpu = self.cpu.collect();
        let ram = self.ram.collect();
        let gpus = self
            .gpu_probes
            .iter_mut()
            .flat_map(|probe| probe.collect())
            .collect();

        SystemMetrics { cpu, ram, gpus }
    }
}
