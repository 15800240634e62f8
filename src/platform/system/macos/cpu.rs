use std::ptr;

use crate::core::system_monitor::{CpuMetric, CpuSampleState, CpuTicks, TEMPERATURE_UNAVAILABLE};

/// CPU collector backed by `host_processor_info(PROCESSOR_CPU_LOAD_INFO)`
///
/// Temperature needs privileged SMC access and is never reported.
pub struct CpuCollector {
    state: CpuSampleState,
    core_count: usize,
}

impl CpuCollector {
    pub fn new() -> Self {
        Self {
            state: CpuSampleState::new(),
            core_count: crate::platform::system::core_count(),
        }
    }

    pub fn collect(&mut self) -> CpuMetric {
        let usage_percent = match read_cpu_ticks() {
            Some(ticks) => self.state.advance(ticks),
            None => {
                log::debug!("host_processor_info failed, reporting 0% CPU this cycle");
                0.0
            }
        };

        CpuMetric {
            usage_percent,
            temperature_celsius: TEMPERATURE_UNAVAILABLE,
            core_count: self.core_count,
        }
    }
}

impl Default for CpuCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum the per-processor tick counters: idle = IDLE, total = USER + SYSTEM + IDLE + NICE.
fn aggregate_ticks<'a>(loads: impl IntoIterator<Item = &'a [libc::c_uint]>) -> CpuTicks {
    let mut ticks = CpuTicks::default();
    for load in loads {
        let state = |index: libc::c_int| u64::from(load[index as usize]);
        let idle = state(libc::CPU_STATE_IDLE);
        ticks.idle = ticks.idle.saturating_add(idle);
        ticks.total = ticks
            .total
            .saturating_add(state(libc::CPU_STATE_USER))
            .saturating_add(state(libc::CPU_STATE_SYSTEM))
            .saturating_add(idle)
            .saturating_add(state(libc::CPU_STATE_NICE));
    }
    ticks
}

#[allow(deprecated)]
fn read_cpu_ticks() -> Option<CpuTicks> {
    let mut cpu_count: libc::natural_t = 0;
    let mut info: libc::processor_info_array_t = ptr::null_mut();
    let mut info_count: libc::mach_msg_type_number_t = 0;

    // SAFETY: out-pointers are valid locals; on success the kernel hands back
    // an array of `info_count` integers that is released below.
    let result = unsafe {
        libc::host_processor_info(
            libc::mach_host_self(),
            libc::PROCESSOR_CPU_LOAD_INFO,
            &mut cpu_count,
            &mut info,
            &mut info_count,
        )
    };
    if result != libc::KERN_SUCCESS || info.is_null() {
        return None;
    }

    let states = libc::CPU_STATE_MAX as usize;
    // SAFETY: the array holds CPU_STATE_MAX counters per processor
    let raw =
        unsafe { std::slice::from_raw_parts(info as *const libc::c_uint, info_count as usize) };
    let ticks = aggregate_ticks(raw.chunks_exact(states).take(cpu_count as usize));

    // SAFETY: releases exactly the region returned by host_processor_info
    unsafe {
        libc::vm_deallocate(
            libc::mach_task_self(),
            info as libc::vm_address_t,
            (info_count as usize * std::mem::size_of::<libc::integer_t>()) as libc::vm_size_t,
        );
    }

    Some(ticks)
}
