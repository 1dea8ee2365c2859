//! Configuration management for octoscope
//!
//! Settings live in a single TOML file, by default
//! `$XDG_CONFIG_HOME/octoscope/config.toml` (or `~/.config/octoscope/config.toml`).
//! Every field has a default, so a missing file or a partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::format::COUNT_UP_DURATION;
use crate::{OctoscopeError, Result};

/// Top-level octoscope configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OctoscopeConfig {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Terminal dashboard settings
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent sent with every request (the API rejects requests without one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Terminal dashboard settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Accounts offered for one-key search on the search panel
    #[serde(default = "default_quick_picks")]
    pub quick_picks: Vec<String>,

    /// Duration of the stat counter animation in milliseconds
    #[serde(default = "default_count_up_ms")]
    pub count_up_ms: u64,

    /// Event poll / redraw interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

// Default value providers
fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("octoscope/{}", env!("CARGO_PKG_VERSION"))
}

fn default_quick_picks() -> Vec<String> {
    vec![
        "torvalds".to_string(),
        "gaearon".to_string(),
        "sindresorhus".to_string(),
        "yyx990803".to_string(),
    ]
}

fn default_count_up_ms() -> u64 {
    COUNT_UP_DURATION.as_millis() as u64
}

fn default_tick_ms() -> u64 {
    50
}

impl OctoscopeConfig {
    /// Default location of the configuration file, if a home can be found
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join("octoscope").join("config.toml"))
    }

    /// Load configuration from `path` or use defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| {
                OctoscopeError::Config(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            })
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write the default configuration to `path`, creating parent directories
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&Self::default()).map_err(|e| {
            OctoscopeError::Config(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl DashboardSettings {
    pub fn count_up_duration(&self) -> Duration {
        Duration::from_millis(self.count_up_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

impl Default for OctoscopeConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            dashboard: DashboardSettings::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            quick_picks: default_quick_picks(),
            count_up_ms: default_count_up_ms(),
            tick_ms: default_tick_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = OctoscopeConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, OctoscopeConfig::default());
        assert_eq!(config.api.base_url, "https://api.github.com");
        assert_eq!(config.dashboard.count_up_ms, 600);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:8080\"\n\n[dashboard]\nquick_picks = [\"octocat\"]\n",
        )
        .unwrap();

        let config = OctoscopeConfig::load_or_default(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(config.api.user_agent.starts_with("octoscope/"));
        assert_eq!(config.dashboard.quick_picks, vec!["octocat".to_string()]);
        assert_eq!(config.dashboard.tick_ms, 50);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 3").unwrap();

        let err = OctoscopeConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, OctoscopeError::Config(_)));
    }

    #[test]
    fn test_write_default_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        OctoscopeConfig::write_default(&path).unwrap();
        let loaded = OctoscopeConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded, OctoscopeConfig::default());
    }

    #[test]
    fn test_tick_has_floor() {
        let settings = DashboardSettings {
            tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.tick(), Duration::from_millis(10));
    }
}
