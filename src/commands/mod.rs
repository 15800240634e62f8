// Command handlers module
pub mod config;
pub mod monitor;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::Config;

/// `--config PATH` when given, the per-user default otherwise
pub fn config_path(matches: &ArgMatches) -> Result<PathBuf> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Ok(path.clone()),
        None => Config::default_path().context("Failed to locate the config file"),
    }
}

/// Load and validate the thresholds used by `watch` and `snapshot`
pub fn load_config(matches: &ArgMatches) -> Result<Config> {
    let path = config_path(matches)?;
    let config = Config::load_from(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid thresholds in {:?}", path))?;
    Ok(config)
}
