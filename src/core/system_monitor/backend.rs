//! Platform backend selection.
//!
//! The set of backends is closed and chosen at compile time from the target OS.

#[cfg(target_os = "linux")]
use crate::platform::system::linux::LinuxBackend;
#[cfg(target_os = "macos")]
use crate::platform::system::macos::MacOsBackend;

use super::metrics::{CpuMetric, SystemMetrics};

/// Produces one aggregate snapshot per call.
///
/// `collect` takes `&mut self`: a backend samples sequentially and owns its
/// collectors' previous-sample state.
pub trait MetricsBackend: Send {
    fn name(&self) -> &'static str;

    fn collect(&mut self) -> SystemMetrics;
}

/// The backend compiled in for the running OS
pub enum PlatformBackend {
    #[cfg(target_os = "linux")]
    Linux(LinuxBackend),
    #[cfg(target_os = "macos")]
    MacOs(MacOsBackend),
    /// Any other OS: zeroed snapshots
    Unsupported,
}

impl MetricsBackend for PlatformBackend {
    fn name(&self) -> &'static str {
        match self {
            #[cfg(target_os = "linux")]
            PlatformBackend::Linux(backend) => backend.name(),
            #[cfg(target_os = "macos")]
            PlatformBackend::MacOs(backend) => backend.name(),
            PlatformBackend::Unsupported => "unsupported",
        }
    }

    fn collect(&mut self) -> SystemMetrics {
        match self {
            #[cfg(target_os = "linux")]
            PlatformBackend::Linux(backend) => backend.collect(),
            #[cfg(target_os = "macos")]
            PlatformBackend::MacOs(backend) => backend.collect(),
            PlatformBackend::Unsupported => SystemMetrics {
                cpu: CpuMetric {
                    core_count: crate::platform::system::core_count(),
                    ..CpuMetric::default()
                },
                ..SystemMetrics::default()
            },
        }
    }
}

/// Build the backend for the OS this binary was compiled for.
///
/// GPU probes are discovered here, once; dynamically loaded vendor libraries
/// stay loaded until the backend is dropped.
pub fn create_platform_backend() -> PlatformBackend {
    #[cfg(target_os = "linux")]
    {
        PlatformBackend::Linux(LinuxBackend::new())
    }
    #[cfg(target_os = "macos")]
    {
        PlatformBackend::MacOs(MacOsBackend::new())
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        log::warn!(
            "No metrics backend for {}; snapshots will be empty",
            std::env::consts::OS
        );
        PlatformBackend::Unsupported
    }
}
