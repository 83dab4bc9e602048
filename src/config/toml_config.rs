use crate::core::store::DEFAULT_STORAGE_KEY;
use crate::utils::error::{CatalogueError, Result};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_storage_key, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_SEED_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_storage_key(),
        }
    }
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// URL or file path of the seed document.
    pub source: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogueError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogueError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SEED_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogueError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn seed_timeout_seconds(&self) -> u64 {
        self.seed
            .timeout_seconds
            .unwrap_or(DEFAULT_SEED_TIMEOUT_SECONDS)
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format.unwrap_or_default()
    }
}

/// Seed locations that look like URLs must be http(s); anything else is a path.
pub fn validate_seed_location(field_name: &str, location: &str) -> Result<()> {
    if location.contains("://") {
        validate_url(field_name, location)
    } else {
        validate_path(field_name, location)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_storage_key("storage.key", &self.storage.key)?;
        if let Some(source) = &self.seed.source {
            validate_seed_location("seed.source", source)?;
        }
        if let Some(timeout) = self.seed.timeout_seconds {
            validate_positive_number("seed.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_dir = "/var/lib/catalogue"
key = "brands"

[seed]
source = "https://example.com/data/brands.json"
timeout_seconds = 3

[logging]
verbose = true
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.data_dir, "/var/lib/catalogue");
        assert_eq!(config.storage.key, "brands");
        assert_eq!(config.seed_timeout_seconds(), 3);
        assert!(config.verbose());
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.storage.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.seed.source, None);
        assert_eq!(config.seed_timeout_seconds(), DEFAULT_SEED_TIMEOUT_SECONDS);
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CATALOGUE_TEST_SEED_URL", "https://seed.example.com/brands.json");

        let toml_content = r#"
[seed]
source = "${CATALOGUE_TEST_SEED_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.seed.source.as_deref(),
            Some("https://seed.example.com/brands.json")
        );

        std::env::remove_var("CATALOGUE_TEST_SEED_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_scheme = TomlConfig::from_toml_str("[seed]\nsource = \"ftp://example.com/brands.json\"\n").unwrap();
        assert!(bad_scheme.validate().is_err());

        let zero_timeout = TomlConfig::from_toml_str("[seed]\ntimeout_seconds = 0\n").unwrap();
        assert!(zero_timeout.validate().is_err());

        let blank_key = TomlConfig::from_toml_str("[storage]\nkey = \"  \"\n").unwrap();
        assert!(blank_key.validate().is_err());

        let escaping_key = TomlConfig::from_toml_str("[storage]\nkey = \"../brands\"\n").unwrap();
        assert!(escaping_key.validate().is_err());

        let file_seed = TomlConfig::from_toml_str("[seed]\nsource = \"data/brands.json\"\n").unwrap();
        assert!(file_seed.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"./catalogue-data\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.data_dir, "./catalogue-data");
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[storage\n").unwrap_err();
        assert!(matches!(err, CatalogueError::ConfigValidation { .. }));
    }
}
