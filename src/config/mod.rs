#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_storage_key, Validate};
use std::time::Duration;
use toml_config::{validate_seed_location, LogFormat, TomlConfig};

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

/// Effective settings after merging the config file with command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: String,
    pub storage_key: String,
    pub seed_source: Option<String>,
    pub seed_timeout: Duration,
    pub verbose: bool,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_file_config(&TomlConfig::default())
    }
}

impl Settings {
    pub fn from_file_config(config: &TomlConfig) -> Self {
        Self {
            data_dir: config.storage.data_dir.clone(),
            storage_key: config.storage.key.clone(),
            seed_source: config.seed.source.clone(),
            seed_timeout: Duration::from_secs(config.seed_timeout_seconds()),
            verbose: config.verbose(),
            log_format: config.log_format(),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_storage_key("storage_key", &self.storage_key)?;
        if let Some(source) = &self.seed_source {
            validate_seed_location("seed", source)?;
        }
        validate_positive_number("seed_timeout", self.seed_timeout.as_secs(), 1)?;
        Ok(())
    }
}
