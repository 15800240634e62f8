use std::ffi::CStr;
use std::mem;

use crate::core::system_monitor::{MemoryReading, RamMetric};

const HW_MEMSIZE: &CStr = c"hw.memsize";

/// Page counts that make up "used" memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmPages {
    pub active: u64,
    pub wired: u64,
    pub compressed: u64,
}

impl VmPages {
    /// Used bytes, capped at `total_bytes`
    pub fn to_reading(self, page_size: u64, total_bytes: u64) -> MemoryReading {
        let pages = self
            .active
            .saturating_add(self.wired)
            .saturating_add(self.compressed);
        MemoryReading {
            total_bytes,
            used_bytes: pages.saturating_mul(page_size).min(total_bytes),
        }
    }
}

/// RAM collector using `hw.memsize` and `host_statistics64`. Stateless.
#[derive(Debug, Default)]
pub struct RamCollector;

impl RamCollector {
    pub fn new() -> Self {
        Self
    }

    pub fn collect(&self) -> RamMetric {
        let Some(total_bytes) = read_total_bytes() else {
            log::debug!("sysctl hw.memsize failed");
            return RamMetric::default();
        };

        match (read_vm_pages(), page_size()) {
            (Some(pages), Some(page_size)) => {
                pages.to_reading(page_size, total_bytes).into_metric()
            }
            _ => {
                log::debug!("host_statistics64 failed, reporting total only");
                MemoryReading {
                    total_bytes,
                    used_bytes: 0,
                }
                .into_metric()
            }
        }
    }
}

fn read_total_bytes() -> Option<u64> {
    let mut value: u64 = 0;
    let mut size = mem::size_of::<u64>();
    // SAFETY: value/size describe a valid u64 out-buffer
    let result = unsafe {
        libc::sysctlbyname(
            HW_MEMSIZE.as_ptr(),
            &mut value as *mut u64 as *mut libc::c_void,
            &mut size,
            std::ptr::null_mut(),
            0,
        )
    };
    (result == 0 && value > 0).then_some(value)
}

fn page_size() -> Option<u64> {
    // SAFETY: sysconf has no memory-safety preconditions
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    u64::try_from(size).ok().filter(|size| *size > 0)
}

#[allow(deprecated)]
fn read_vm_pages() -> Option<VmPages> {
    // SAFETY: vm_statistics64 is plain old data
    let mut stats: libc::vm_statistics64 = unsafe { mem::zeroed() };
    let mut count = libc::HOST_VM_INFO64_COUNT;
    // SAFETY: stats is large enough for HOST_VM_INFO64_COUNT integers
    let result = unsafe {
        libc::host_statistics64(
            libc::mach_host_self(),
            libc::HOST_VM_INFO64,
            &mut stats as *mut libc::vm_statistics64 as libc::host_info64_t,
            &mut count,
        )
    };
    if result != libc::KERN_SUCCESS {
        return None;
    }

    Some(VmPages {
        active: u64::from(stats.active_count),
        wired: u64::from(stats.wire_count),
        compressed: u64::from(stats.compressor_page_count),
    })
}
