use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::fs;
use crate::error::{Error, Result};

pub const API_URL_ENV: &str = "SCALEWATCH_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_history_samples")]
    pub history_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_show_memory_card")]
    pub show_memory_card: bool,
}

fn default_base_url() -> String { "http://localhost:8000".to_string() }
fn default_timeout_ms() -> u64 { 4000 }
fn default_interval_ms() -> u64 { 5000 }
fn default_history_samples() -> usize { 20 }
fn default_theme() -> String { "dark".to_string() }
fn default_show_memory_card() -> bool { true }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            history_samples: default_history_samples(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_memory_card: default_show_memory_card(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            refresh: RefreshConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        self
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| Error::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config/scalewatch/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.refresh.interval_ms, 5000);
        assert_eq!(config.refresh.history_samples, 20);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = Config::from_toml(
            "[api]\nbase_url = \"http://scaler:9000\"\n\n[refresh]\ninterval_ms = 1000\n",
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://scaler:9000");
        assert_eq!(config.api.timeout_ms, 4000);
        assert_eq!(config.refresh.interval_ms, 1000);
        assert_eq!(config.refresh.history_samples, 20);
        assert!(config.display.show_memory_card);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("refresh = 12").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\ntheme = \"light\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.display.theme, "light");
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }
}
