// resmon Library - Public API

// Re-export error types
pub mod error;
pub use error::{ResmonError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export the two core operations and the snapshot types
pub use crate::core::config::Config;
pub use crate::core::system_monitor::{
    create_platform_backend, evaluate, AlertConfig, AlertThreshold, CpuMetric, GpuMetric,
    GpuVendor, MetricsBackend, PlatformBackend, RamMetric, Severity, SeverityState,
    SystemMetrics,
};

// Initialize logging
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
