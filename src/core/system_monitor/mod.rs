//! System monitoring core functionality.
//!
//! Platform-independent snapshot types, CPU delta and memory arithmetic, the
//! GPU probe trait, backend selection and threshold evaluation. The raw
//! readers live in `crate::platform`.

pub mod alerts;
mod backend;
mod cpu_sample;
mod gpu;
mod memory;
mod metrics;

pub use alerts::{
    check_threshold, evaluate, AlertConfig, AlertThreshold, Quantity, Severity, SeverityState,
};
pub use backend::{create_platform_backend, MetricsBackend, PlatformBackend};
pub use cpu_sample::{usage_between, CpuSampleState, CpuTicks};
pub use gpu::GpuProbe;
pub use memory::MemoryReading;
pub use metrics::{
    clamp_percent, CpuMetric, GpuMetric, GpuVendor, RamMetric, SystemMetrics,
    TEMPERATURE_UNAVAILABLE,
};
