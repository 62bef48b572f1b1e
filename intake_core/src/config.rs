//! Configuration file support for the intake desk.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/intake/config.toml`.

use crate::types::DEFAULT_MAX_NAME_LEN;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub intake: IntakeConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Registration rules
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Reject ids already waiting or served
    #[serde(default)]
    pub reject_duplicate_ids: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            reject_duplicate_ids: false,
        }
    }
}

/// Menu display options
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clear_screen: default_clear_screen(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_max_name_len() -> usize {
    DEFAULT_MAX_NAME_LEN
}

fn default_clear_screen() -> bool {
    true
}

fn default_log_level() -> String {
    crate::logging::DEFAULT_LEVEL.into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("intake").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values no desk could work with
    pub fn validate(&self) -> Result<()> {
        if self.intake.max_name_len == 0 {
            return Err(Error::Config(
                "intake.max_name_len must be at least 1".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.intake.max_name_len, 49);
        assert!(!config.intake.reject_duplicate_ids);
        assert!(config.display.clear_screen);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.intake.max_name_len, parsed.intake.max_name_len);
        assert_eq!(config.logging.level, parsed.logging.level);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[intake]
reject_duplicate_ids = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.intake.reject_duplicate_ids);
        assert_eq!(config.intake.max_name_len, 49); // default
        assert!(config.display.clear_screen);
    }

    #[test]
    fn test_load_from_and_save_to() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.intake.max_name_len = 20;
        config.display.clear_screen = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.intake.max_name_len, 20);
        assert!(!loaded.display.clear_screen);
    }

    #[test]
    fn test_zero_name_len_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[intake]\nmax_name_len = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[intake\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}
