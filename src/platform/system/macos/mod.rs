//! macOS backend: Mach host statistics for CPU/RAM, display registry for GPUs.

mod cpu;
mod ram;

pub use cpu::CpuCollector;
pub use ram::{RamCollector, VmPages};

use crate::core::system_monitor::{GpuProbe, MetricsBackend, SystemMetrics};
use crate::platform::gpu::{log_probe_summary, macos_gpu_probes};

pub struct MacOsBackend {
    cpu: CpuCollector,
    ram: RamCollector,
    gpu_probes: Vec<Box<dyn GpuProbe>>,
}

impl MacOsBackend {
    pub fn new() -> Self {
        let gpu_probes = macos_gpu_probes();
        log_probe_summary(&gpu_probes);
        Self {
            cpu: CpuCollector::new(),
            ram: RamCollector::new(),
            gpu_probes,
        }
    }
}

impl Default for MacOsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsBackend for MacOsBackend {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn collect(&mut self) -> SystemMetrics {
        SystemMetrics {
            cpu: self.cpu.collect(),
            ram: self.ram.collect(),
            gpus: self
                .gpu_probes
                .iter_mut()
                .flat_map(|probe| probe.collect())
                .collect(),
        }
    }
}
