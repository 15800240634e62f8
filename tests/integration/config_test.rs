use resmon::{AlertThreshold, Config};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_default_thresholds() {
    let config = Config::default();
    assert_eq!(config.alerts.cpu_usage, AlertThreshold::new(80.0, 95.0));
    assert_eq!(config.alerts.gpu_temp, AlertThreshold::new(75.0, 90.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_roundtrip_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("resmon/config.json");

    let mut config = Config::default();
    config.alerts.ram_usage = AlertThreshold::new(60.0, 70.0);
    config.alerts.cpu_temp.enabled = false;
    config.save_to(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"ram_usage\""));

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_threshold_without_enabled_defaults_to_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "alerts": { "gpu_usage": { "warning": 10, "critical": 20 } } }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.alerts.gpu_usage.enabled);
    assert_eq!(config.alerts.gpu_usage.warning, 10.0);
}

#[test]
fn test_inverted_thresholds_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "alerts": { "ram_usage": { "warning": 99, "critical": 50 } } }"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("ram_usage"));
}

#[test]
fn test_default_path_ends_with_resmon_config() {
    if let Ok(path) = Config::default_path() {
        assert!(path.ends_with("resmon/config.json"));
    }
}
