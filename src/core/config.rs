use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::system_monitor::alerts::{AlertConfig, Quantity};
use crate::error::{ResmonError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alerts: AlertConfig,
}

impl Config {
    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// A missing, empty or unreadable-as-JSON file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(e.into()),
        };

        if data.trim().is_empty() {
            log::warn!("Config file {} is empty, using defaults", path.display());
            return Ok(Config::default());
        }

        match serde_json::from_str(&data) {
            Ok(config) => Ok(config),
            Err(e) => {
                // Can happen when the config format changes
                log::warn!(
                    "Config file {} could not be parsed ({}), using defaults",
                    path.display(),
                    e
                );
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        log::debug!("Config written to {}", path.display());

        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ResmonError::config("Could not determine config directory"))?;

        Ok(config_dir.join("resmon").join("config.json"))
    }

    /// Every threshold must be finite with `warning <= critical`.
    pub fn validate(&self) -> Result<()> {
        for quantity in Quantity::ALL {
            let threshold = self.alerts.threshold(quantity);
            if !threshold.warning.is_finite() || !threshold.critical.is_finite() {
                return Err(ResmonError::config(format!(
                    "{}: thresholds must be finite numbers",
                    quantity.name()
                )));
            }
            if threshold.warning > threshold.critical {
                return Err(ResmonError::config(format!(
                    "{}: warning ({}) is above critical ({})",
                    quantity.name(),
                    threshold.warning,
                    threshold.critical
                )));
            }
        }
        Ok(())
    }
}
