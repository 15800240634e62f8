// Platform-specific metric sources

pub mod gpu;
pub mod sysfs;
pub mod system;
