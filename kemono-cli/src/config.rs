//! CLI configuration file.
//!
//! Stored as JSON at `<config dir>/kemono/config.json`. A missing file means
//! defaults; every section and field may be omitted.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use kemono_core::{ContentSource, SourceSettings};
use kemono_fetch::FetchContext;
use kemono_source::{Endpoints, KemonoSource, SourceConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Handed to the source on enable.
    #[serde(default)]
    pub source: SourceConfig,
    /// User settings handed to the source on enable.
    #[serde(default)]
    pub settings: SourceSettings,
    /// Site, API and image origins.
    #[serde(default)]
    pub endpoints: Endpoints,
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Log level for the `kemono` crates when not in verbose mode.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// User agent override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            user_agent: None,
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kemono")
            .join("config.json")
    }

    /// Loads from `path`, or from the default path when `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Builds an enabled source from this configuration.
    pub fn build_source(&self) -> Result<KemonoSource> {
        let endpoints = self.endpoints.clone().normalized()?;

        let mut settings = endpoints
            .fetch_settings()
            .with_timeout(Duration::from_secs(self.general.timeout_secs));
        if let Some(user_agent) = &self.general.user_agent {
            settings = settings.with_user_agent(user_agent.clone());
        }

        let context = FetchContext::with_settings(settings)?;
        let mut source = KemonoSource::with_context(&context, endpoints)?;
        source.enable(self.source.clone(), self.settings.clone());
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.general.timeout_secs, 30);
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.endpoints.site, "https://kemono.cr");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.source = SourceConfig::new("my-plugin");
        config.general.timeout_secs = 5;
        config.settings.set("quality", "high");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"source": {"id": "abc"}, "general": {"log_level": "info"}}"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.source.id, "abc");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.timeout_secs, 30);
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_build_source_enables_with_plugin_id() {
        let mut config = Config::default();
        config.source = SourceConfig::new("my-plugin");

        let source = config.build_source().unwrap();
        assert_eq!(source.config().id, "my-plugin");
        assert!(source.is_channel_url("https://kemono.cr/patreon/user/1"));
    }

    #[test]
    fn test_build_source_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.endpoints.api = "relative/path".to_string();
        assert!(config.build_source().is_err());
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.ends_with("kemono/config.json"));
    }
}
