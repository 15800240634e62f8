// Core logic: snapshot model, evaluation and configuration

pub mod config;
pub mod system_monitor;

pub use config::Config;
