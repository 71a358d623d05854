use serde::{Deserialize, Serialize};
use url::Url;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::notifications::NotificationsConfig;
use super::rules::RulesConfig;
use super::storage::StorageConfig;

/// Main configuration structure for sitefence
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Block-list store location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Redirect-rule table and block page
    #[serde(default)]
    pub rules: RulesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Unblock notifications
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Command-line overrides applied on top of the loaded file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub store_path: Option<String>,
    pub rules_path: Option<String>,
    pub block_page_url: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sitefence.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("sitefence.toml").exists() {
            Self::from_file("sitefence.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(path) = overrides.store_path {
            self.storage.path = path;
        }
        if let Some(path) = overrides.rules_path {
            self.rules.path = path;
        }
        if let Some(url) = overrides.block_page_url {
            self.rules.block_page_url = url;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.path.is_empty() {
            return Err(ConfigError::Validation(
                "Store path cannot be empty".to_string(),
            ));
        }

        if self.rules.path.is_empty() {
            return Err(ConfigError::Validation(
                "Rules path cannot be empty".to_string(),
            ));
        }

        Url::parse(&self.rules.block_page_url).map_err(|e| {
            ConfigError::Validation(format!(
                "Block page URL '{}' is not a valid URL: {e}",
                self.rules.block_page_url
            ))
        })?;

        Ok(())
    }
}
