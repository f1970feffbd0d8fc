use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// GitHub caps `per_page` at 100
pub const MAX_PAGE_SIZE: u32 = 100;

/// Main configuration structure
///
/// Loaded from the config file, then environment variables win.
/// The API endpoint is deliberately absent: it is a constant in gitseek-api.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub github: GitHubConfig,
}

impl Config {
    /// Load from the default location (missing file = defaults) plus env overrides
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// File only, no environment
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.search.page_size = clamp_page_size(config.search.page_size);
        Ok(config)
    }

    /// Apply `GITSEEK_*` / `GITHUB_TOKEN` overrides. `lookup` is `std::env::var` in practice.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("GITSEEK_APP_NAME").filter(|v| !v.trim().is_empty()) {
            self.app.name = name;
        }
        if let Some(version) = lookup("GITSEEK_APP_VERSION").filter(|v| !v.trim().is_empty()) {
            self.app.version = version;
        }
        if let Some(raw) = lookup("GITSEEK_PAGE_SIZE") {
            match raw.trim().parse::<u32>() {
                Ok(size) => self.search.page_size = clamp_page_size(size),
                Err(_) => warn!("Ignoring GITSEEK_PAGE_SIZE={:?}: not a number", raw),
            }
        }
        if let Some(token) = lookup("GITHUB_TOKEN").filter(|v| !v.trim().is_empty()) {
            self.github.token = Some(token);
        }
    }

    /// `<config dir>/gitseek/config.toml`
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("gitseek");

        Ok(config_dir.join("config.toml"))
    }

    /// `<app>/<version>`, sent as the User-Agent
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.app.name, self.app.version)
    }
}

fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Shows up in report titles, export file names and the User-Agent
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

fn default_app_name() -> String {
    "gitseek".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Results per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GitHubConfig {
    /// Personal access token. Signed-in sessions skip the usage limit.
    pub token: Option<String>,
}
