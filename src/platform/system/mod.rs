// Per-OS CPU and RAM collectors plus the backend that composes them

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;

use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Logical CPU count, falling back to the physical count, never below 1.
pub fn core_count() -> usize {
    let sys =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
    let logical = sys.cpus().len();
    if logical > 0 {
        return logical;
    }

    System::physical_core_count().unwrap_or(0).max(1)
}
