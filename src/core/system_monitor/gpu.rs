use super::metrics::GpuMetric;

/// Trait for GPU metrics probes
///
/// One implementation per vendor (and per OS where the raw source differs).
/// Devices are discovered when the probe is built; `collect` only reads the
/// sensors of the devices found then. Implementations live in the platform layer.
pub trait GpuProbe: Send {
    /// Get the vendor this probe reads
    fn vendor(&self) -> GpuVendor;

    /// Whether the probe found its data source (library, registry, sysfs devices)
    fn is_available(&self) -> bool;

    /// Number of devices found at construction
    fn device_count(&self) -> usize;

    /// One record per device. Empty means "no devices of this vendor", never an error.
    fn collect(&mut self) -> Vec<GpuMetric>;
}

// Re-export GpuVendor for convenience
pub use super::metrics::GpuVendor;
