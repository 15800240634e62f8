use resmon::core::system_monitor::GpuProbe;
use resmon::platform::gpu::classify::{classify, RegistryEntry, PCI_VENDOR_NVIDIA};
use resmon::platform::gpu::{parse_displays_json, RegistryGpuProbe};
use resmon::GpuVendor;

const DUAL_GPU_MAC: &str = r#"{
    "SPDisplaysDataType": [
        {
            "_name": "kHW_IntelUHDGraphics630Item",
            "sppci_model": "Intel UHD Graphics 630",
            "spdisplays_vendor": "sppci_vendor_intel",
            "spdisplays_vram_shared": "1536 MB"
        },
        {
            "_name": "kHW_AMDRadeonPro5500MItem",
            "sppci_model": "AMD Radeon Pro 5500M",
            "spdisplays_vendor": "sppci_vendor_amd",
            "spdisplays_vram": "4 GB"
        }
    ]
}"#;

#[test]
fn test_registry_devices_keep_report_order() {
    let entries = parse_displays_json(DUAL_GPU_MAC).unwrap();
    let mut probe = RegistryGpuProbe::from_entries(&entries);
    assert_eq!(probe.device_count(), 2);

    let gpus = probe.collect();
    let vendors: Vec<GpuVendor> = gpus.iter().map(|gpu| gpu.vendor).collect();
    assert_eq!(vendors, vec![GpuVendor::Intel, GpuVendor::Amd]);
    assert_eq!(gpus[1].vram_total_bytes, 4 * 1024 * 1024 * 1024);
    assert!(gpus.iter().all(|gpu| gpu.usage_percent == 0.0 && gpu.vram_used_bytes == 0));
}

#[test]
fn test_registry_probe_repeats_same_devices() {
    let entries = parse_displays_json(DUAL_GPU_MAC).unwrap();
    let mut probe = RegistryGpuProbe::from_entries(&entries);
    assert_eq!(probe.collect(), probe.collect());
}

#[test]
fn test_vendor_id_only_entry() {
    let entry = RegistryEntry {
        vendor_id: Some(PCI_VENDOR_NVIDIA),
        ..RegistryEntry::default()
    };
    assert_eq!(classify(&entry), GpuVendor::Nvidia);
}
