//! Configuration management for tldrfeed CLI
//!
//! Stores the service URL and a default user in ~/.config/tldrfeed/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "tldrfeed";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            default_user: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content).with_context(|| "Failed to parse config file")
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))
    }

    /// Service URL: the explicit override if given, else the stored one
    pub fn url_or(&self, url: Option<&str>) -> String {
        url.map(str::to_string).unwrap_or_else(|| self.url.clone())
    }

    /// User ID: the explicit one if given, else the default user
    pub fn user_or(&self, user: Option<&str>) -> Option<String> {
        user.map(str::to_string).or_else(|| self.default_user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.url, "http://localhost:8080");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            url: "http://feeds.example:9000".to_string(),
            default_user: Some("u-1".to_string()),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_overrides() {
        let config = Config {
            url: "http://stored".to_string(),
            default_user: Some("stored-user".to_string()),
        };

        assert_eq!(config.url_or(None), "http://stored");
        assert_eq!(config.url_or(Some("http://flag")), "http://flag");
        assert_eq!(config.user_or(None).as_deref(), Some("stored-user"));
        assert_eq!(config.user_or(Some("flag-user")).as_deref(), Some("flag-user"));
        assert_eq!(Config::default().user_or(None), None);
    }
}
