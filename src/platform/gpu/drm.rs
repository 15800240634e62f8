//! Discovery of GPUs through `/sys/class/drm`.

use std::path::{Path, PathBuf};

use crate::platform::sysfs;

pub use super::classify::{PCI_VENDOR_AMD, PCI_VENDOR_INTEL};

/// One `cardN` entry whose PCI vendor matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrmDevice {
    /// `<root>/sys/class/drm/cardN/device`
    pub device_dir: PathBuf,
    /// hwmon `temp1_input`, resolved once at discovery
    pub temp_path: Option<PathBuf>,
}

impl DrmDevice {
    pub fn file(&self, name: &str) -> PathBuf {
        self.device_dir.join(name)
    }
}

/// `cardN` directories only; connector entries such as `card0-HDMI-A-1` are skipped.
fn is_card_entry(name: &str) -> bool {
    name.strip_prefix("card")
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('-'))
}

/// Scan `<root>/sys/class/drm` for cards whose `device/vendor` equals `vendor_id`.
pub fn scan(root: &Path, vendor_id: u32) -> Vec<DrmDevice> {
    let drm_root = root.join("sys/class/drm");

    sysfs::list_dir(&drm_root)
        .into_iter()
        .filter(|name| is_card_entry(name))
        .map(|name| drm_root.join(name).join("device"))
        .filter(|device_dir| {
            sysfs::read_string(&device_dir.join("vendor"))
                .and_then(|v| sysfs::parse_hex_id(&v))
                == Some(vendor_id)
        })
        .map(|device_dir| DrmDevice {
            temp_path: sysfs::find_hwmon_temp_input(&device_dir),
            device_dir,
        })
        .collect()
}
