//! CPU utilization as a delta between two tick samples.

use super::metrics::clamp_percent;

/// One raw reading of the aggregate CPU tick counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub idle: u64,
    pub total: u64,
}

/// Previous-sample state owned by a CPU collector.
///
/// Each collection reads new ticks and calls [`CpuSampleState::advance`] once;
/// the delta is computed and the stored sample replaced in that single step.
#[derive(Debug, Clone, Default)]
pub struct CpuSampleState {
    previous: Option<CpuTicks>,
}

impl CpuSampleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Store `current` and return the usage since the previous sample.
    ///
    /// Returns 0 on the first call and whenever the total counter did not move
    /// forward; the new sample is stored either way.
    pub fn advance(&mut self, current: CpuTicks) -> f32 {
        let usage = match self.previous {
            Some(previous) => usage_between(previous, current),
            None => 0.0,
        };
        self.previous = Some(current);
        usage
    }
}

/// `100 * (1 - Δidle / Δtotal)` in f64, clamped to [0, 100].
pub fn usage_between(previous: CpuTicks, current: CpuTicks) -> f32 {
    if current.total <= previous.total {
        return 0.0;
    }
    let total_delta = (current.total - previous.total) as f64;
    // idle moving backward while total moves forward is a counter anomaly; treat as fully busy
    let idle_delta = current.idle.saturating_sub(previous.idle) as f64;

    clamp_percent(100.0 * (1.0 - idle_delta / total_delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(idle: u64, total: u64) -> CpuTicks {
        CpuTicks { idle, total }
    }

    #[test]
    fn test_first_sample_reports_zero() {
        let mut state = CpuSampleState::new();
        assert!(!state.has_previous());
        assert_eq!(state.advance(ticks(500, 1000)), 0.0);
        assert!(state.has_previous());
    }

    #[test]
    fn test_usage_from_delta() {
        let mut state = CpuSampleState::new();
        state.advance(ticks(100, 200));
        // 50 idle of 200 elapsed -> 75% busy
        let usage = state.advance(ticks(150, 400));
        assert!((usage - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_backward_counter_reports_zero_and_advances() {
        let mut state = CpuSampleState::new();
        state.advance(ticks(100, 1000));
        assert_eq!(state.advance(ticks(50, 500)), 0.0);
        // The next delta is measured from the reset values, not the stale ones
        let usage = state.advance(ticks(60, 600));
        assert!((usage - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_delta_does_not_reuse_previous_usage() {
        let mut state = CpuSampleState::new();
        state.advance(ticks(0, 100));
        let busy = state.advance(ticks(0, 200));
        assert_eq!(busy, 100.0);
        assert_eq!(state.advance(ticks(0, 200)), 0.0);
    }

    #[test]
    fn test_idle_larger_than_total_is_clamped() {
        assert_eq!(usage_between(ticks(0, 0), ticks(500, 100)), 0.0);
    }
}
