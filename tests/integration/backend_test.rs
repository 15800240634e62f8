#![cfg(target_os = "linux")]

use std::fs;
use std::path::Path;

use resmon::platform::system::linux::LinuxBackend;
use resmon::{evaluate, AlertConfig, GpuVendor, MetricsBackend, Severity};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Fake procfs/sysfs with one Intel iGPU on card0 and one AMD dGPU on card1
fn fake_machine() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "proc/stat", "cpu 100 0 100 800 0 0 0 0 0 0\ncpu0 100 0 100 800 0 0 0 0 0 0\n");
    write(
        root,
        "proc/meminfo",
        "MemTotal:       16000000 kB\nMemFree:         2000000 kB\nMemAvailable:    4000000 kB\n",
    );
    write(root, "sys/class/hwmon/hwmon0/name", "coretemp\n");
    write(root, "sys/class/hwmon/hwmon0/temp1_input", "72000\n");

    write(root, "sys/class/drm/card0/device/vendor", "0x8086\n");
    write(root, "sys/class/drm/card1/device/vendor", "0x1002\n");
    write(root, "sys/class/drm/card1/device/product_name", "Radeon RX 6600\n");
    write(root, "sys/class/drm/card1/device/gpu_busy_percent", "97\n");
    write(root, "sys/class/drm/card1/device/mem_info_vram_used", "2147483648\n");
    write(root, "sys/class/drm/card1/device/mem_info_vram_total", "8589934592\n");

    dir
}

#[test]
fn test_linux_backend_against_fake_tree() {
    let dir = fake_machine();
    let mut backend = LinuxBackend::with_root(dir.path());
    assert_eq!(backend.name(), "linux");

    let first = backend.collect();
    assert_eq!(first.cpu.usage_percent, 0.0);
    assert_eq!(first.cpu.temperature_celsius, 72.0);
    assert_eq!(first.ram.total_bytes, 16_000_000 * 1024);
    assert_eq!(first.ram.used_bytes, 12_000_000 * 1024);
    assert!((first.ram.usage_percent - 75.0).abs() < 1e-3);

    // NVML may or may not exist on the test host; the sysfs devices follow it
    let sysfs_gpus: Vec<_> = first
        .gpus
        .iter()
        .filter(|gpu| gpu.vendor != GpuVendor::Nvidia)
        .collect();
    assert_eq!(sysfs_gpus.len(), 2);
    assert_eq!(sysfs_gpus[0].vendor, GpuVendor::Amd);
    assert_eq!(sysfs_gpus[0].name, "Radeon RX 6600");
    assert_eq!(sysfs_gpus[1].vendor, GpuVendor::Intel);
    assert!(!sysfs_gpus[1].has_temperature());

    write(dir.path(), "proc/stat", "cpu 400 0 100 900 0 0 0 0 0 0\n");
    let second = backend.collect();
    assert!((second.cpu.usage_percent - 75.0).abs() < 1e-3);

    // 75% usage is below warning, 72°C is above it
    let state = evaluate(&second, &AlertConfig::default());
    assert_eq!(state.cpu, Severity::Warning);
    assert_eq!(state.ram, Severity::None);
    assert_eq!(state.gpu, Severity::Critical);
}

#[test]
fn test_linux_backend_with_empty_root() {
    let dir = TempDir::new().unwrap();
    let mut backend = LinuxBackend::with_root(dir.path());

    let metrics = backend.collect();
    assert_eq!(metrics.cpu.usage_percent, 0.0);
    assert!(!metrics.cpu.has_temperature());
    assert_eq!(metrics.ram.total_bytes, 0);
    assert!(metrics
        .gpus
        .iter()
        .all(|gpu| gpu.vendor == GpuVendor::Nvidia));
}
