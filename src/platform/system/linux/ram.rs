use std::fs;
use std::path::PathBuf;

use crate::core::system_monitor::{MemoryReading, RamMetric};

/// The /proc/meminfo fields resmon needs, in kB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kb: u64,
    pub available_kb: Option<u64>,
    pub free_kb: u64,
    pub buffers_kb: u64,
    pub cached_kb: u64,
}

impl MemInfo {
    pub fn parse(contents: &str) -> Self {
        let mut info = MemInfo::default();
        for line in contents.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let value = || {
                rest.split_whitespace()
                    .next()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(0)
            };
            match key {
                "MemTotal" => info.total_kb = value(),
                "MemAvailable" => info.available_kb = Some(value()),
                "MemFree" => info.free_kb = value(),
                "Buffers" => info.buffers_kb = value(),
                "Cached" => info.cached_kb = value(),
                _ => {}
            }
        }
        info
    }

    /// Available memory in kB.
    ///
    /// Uses the kernel's `MemAvailable` (Linux 3.14+). Older kernels lack it and
    /// get `MemFree + Buffers + Cached` instead: an approximation that counts
    /// all page cache as reclaimable, so it overstates what is really available.
    pub fn available_kb(&self) -> u64 {
        self.available_kb.unwrap_or_else(|| {
            self.free_kb
                .saturating_add(self.buffers_kb)
                .saturating_add(self.cached_kb)
        })
    }

    pub fn to_reading(self) -> MemoryReading {
        MemoryReading::from_available(
            self.total_kb.saturating_mul(1024),
            self.available_kb().saturating_mul(1024),
        )
    }
}

/// RAM collector backed by `/proc/meminfo`. Stateless.
pub struct RamCollector {
    meminfo_path: PathBuf,
}

impl RamCollector {
    pub fn new() -> Self {
        Self::with_root("/")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            meminfo_path: root.into().join("proc/meminfo"),
        }
    }

    pub fn collect(&self) -> RamMetric {
        match fs::read_to_string(&self.meminfo_path) {
            Ok(contents) => MemInfo::parse(&contents).to_reading().into_metric(),
            Err(e) => {
                log::debug!("{}: {}", self.meminfo_path.display(), e);
                RamMetric::default()
            }
        }
    }
}

impl Default for RamCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MEMINFO: &str = "\
MemTotal:       16000000 kB
MemFree:         2000000 kB
MemAvailable:    8000000 kB
Buffers:          500000 kB
Cached:          3000000 kB
SwapCached:        10000 kB
";

    #[test]
    fn test_parse_prefers_mem_available() {
        let info = MemInfo::parse(MEMINFO);
        assert_eq!(info.total_kb, 16_000_000);
        assert_eq!(info.cached_kb, 3_000_000);
        assert_eq!(info.available_kb(), 8_000_000);

        let metric = info.to_reading().into_metric();
        assert_eq!(metric.total_bytes, 16_000_000 * 1024);
        assert_eq!(metric.used_bytes, 8_000_000 * 1024);
        assert!((metric.usage_percent - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_old_kernel_fallback() {
        let contents = MEMINFO.replace("MemAvailable:    8000000 kB\n", "");
        let info = MemInfo::parse(&contents);
        assert_eq!(info.available_kb, None);
        assert_eq!(info.available_kb(), 2_000_000 + 500_000 + 3_000_000);
    }

    #[test]
    fn test_swap_cached_is_not_cached() {
        let info = MemInfo::parse("SwapCached: 99 kB\nCached: 7 kB\n");
        assert_eq!(info.cached_kb, 7);
    }

    #[test]
    fn test_collect_from_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("proc")).unwrap();
        fs::write(dir.path().join("proc/meminfo"), MEMINFO).unwrap();

        let metric = RamCollector::with_root(dir.path()).collect();
        assert!(metric.used_bytes <= metric.total_bytes);
        assert!((metric.usage_percent - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_missing_meminfo_is_zeroed() {
        let dir = TempDir::new().unwrap();
        let metric = RamCollector::with_root(dir.path()).collect();
        assert_eq!(metric, RamMetric::default());
    }
}
