use std::io;
use thiserror::Error;

/// Error type for the fallible parts of resmon (config, registry queries, CLI plumbing).
///
/// Missing hardware is never an error: collectors turn it into sentinel values.
#[derive(Error, Debug)]
pub enum ResmonError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Device registry query failed: {0}")]
    Registry(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),
}

/// Result type alias for resmon
pub type Result<T> = std::result::Result<T, ResmonError>;

impl ResmonError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ResmonError::Config(msg.into())
    }

    pub fn registry<S: Into<String>>(msg: S) -> Self {
        ResmonError::Registry(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        ResmonError::GpuNotAvailable(msg.into())
    }
}
