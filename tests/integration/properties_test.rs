use proptest::prelude::*;
use resmon::core::system_monitor::{usage_between, CpuSampleState, CpuTicks, MemoryReading};

proptest! {
    #[test]
    fn cpu_usage_stays_in_range(
        idle1 in 0u64..1_000_000,
        busy1 in 0u64..1_000_000,
        idle_delta in 0u64..1_000_000,
        busy_delta in 0u64..1_000_000,
    ) {
        prop_assume!(idle_delta + busy_delta > 0);
        let previous = CpuTicks { idle: idle1, total: idle1 + busy1 };
        let current = CpuTicks {
            idle: idle1 + idle_delta,
            total: idle1 + busy1 + idle_delta + busy_delta,
        };

        let usage = usage_between(previous, current);
        prop_assert!((0.0..=100.0).contains(&usage));
    }

    #[test]
    fn cpu_usage_never_panics_on_arbitrary_counters(
        a_idle: u64, a_total: u64, b_idle: u64, b_total: u64,
    ) {
        let usage = usage_between(
            CpuTicks { idle: a_idle, total: a_total },
            CpuTicks { idle: b_idle, total: b_total },
        );
        prop_assert!((0.0..=100.0).contains(&usage));
    }

    #[test]
    fn first_sample_is_always_zero(idle: u64, total: u64) {
        let mut state = CpuSampleState::new();
        prop_assert_eq!(state.advance(CpuTicks { idle, total }), 0.0);
        prop_assert!(state.has_previous());
    }

    #[test]
    fn ram_used_never_exceeds_total(total: u64, available: u64) {
        let metric = MemoryReading::from_available(total, available).into_metric();
        prop_assert!(metric.used_bytes <= metric.total_bytes);
        prop_assert!((0.0..=100.0).contains(&metric.usage_percent));
    }
}

#[test]
fn test_ram_usage_from_available() {
    let metric = MemoryReading::from_available(1_000_000_000, 250_000_000).into_metric();
    assert_eq!(metric.used_bytes, 750_000_000);
    assert!((metric.usage_percent - 75.0).abs() < 1e-4);
}
