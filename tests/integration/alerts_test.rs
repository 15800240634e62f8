use resmon::core::system_monitor::check_threshold;
use resmon::{
    evaluate, AlertConfig, AlertThreshold, CpuMetric, GpuMetric, GpuVendor, RamMetric, Severity,
    SystemMetrics,
};

fn gpu(usage: f32, temperature: f32) -> GpuMetric {
    GpuMetric {
        usage_percent: usage,
        temperature_celsius: temperature,
        ..GpuMetric::unmeasured("Test GPU", GpuVendor::Nvidia)
    }
}

#[test]
fn test_cpu_usage_boundaries() {
    let threshold = AlertThreshold::new(80.0, 95.0);
    assert_eq!(check_threshold(94.9, &threshold), Severity::Warning);
    assert_eq!(check_threshold(95.0, &threshold), Severity::Critical);
    assert_eq!(check_threshold(79.9, &threshold), Severity::None);
}

#[test]
fn test_equal_bounds_are_critical() {
    let threshold = AlertThreshold::new(90.0, 90.0);
    assert_eq!(check_threshold(90.0, &threshold), Severity::Critical);
}

#[test]
fn test_disabled_threshold_never_fires() {
    let threshold = AlertThreshold::new(80.0, 95.0).disabled();
    assert_eq!(check_threshold(f32::MAX, &threshold), Severity::None);
}

#[test]
fn test_gpu_composite_is_worst_device() {
    let metrics = SystemMetrics {
        gpus: vec![gpu(85.0, 40.0), gpu(10.0, 92.0)],
        ..SystemMetrics::default()
    };

    let state = evaluate(&metrics, &AlertConfig::default());
    assert_eq!(state.gpu, Severity::Critical);
    assert_eq!(state.worst(), Severity::Critical);
}

#[test]
fn test_no_gpus_is_none() {
    let state = evaluate(&SystemMetrics::default(), &AlertConfig::default());
    assert_eq!(state.gpu, Severity::None);
}

#[test]
fn test_unavailable_temperature_is_ignored() {
    let metrics = SystemMetrics {
        cpu: CpuMetric {
            usage_percent: 5.0,
            temperature_celsius: -1.0,
            core_count: 4,
        },
        gpus: vec![gpu(0.0, -1.0)],
        ..SystemMetrics::default()
    };

    let mut config = AlertConfig::default();
    // Would fire on any real reading
    config.cpu_temp = AlertThreshold::new(0.0, 0.0);
    config.gpu_temp = AlertThreshold::new(0.0, 0.0);

    let state = evaluate(&metrics, &config);
    assert_eq!(state.cpu, Severity::None);
    assert_eq!(state.gpu, Severity::None);
}

#[test]
fn test_cpu_takes_worse_of_usage_and_temperature() {
    let metrics = SystemMetrics {
        cpu: CpuMetric {
            usage_percent: 82.0,
            temperature_celsius: 88.0,
            core_count: 8,
        },
        ram: RamMetric {
            used_bytes: 500,
            total_bytes: 1000,
            usage_percent: 50.0,
        },
        gpus: Vec::new(),
    };

    let state = evaluate(&metrics, &AlertConfig::default());
    assert_eq!(state.cpu, Severity::Critical);
    assert_eq!(state.ram, Severity::None);
}
