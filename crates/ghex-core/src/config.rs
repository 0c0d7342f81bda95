//! Configuration management for ghex.

use crate::error::{ExploreError, ExploreResult};
use gh_api_client::{ClientConfig, DEFAULT_API_URL, MAX_PER_PAGE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const CONFIG_DIR_NAME: &str = "ghex";
const CONFIG_FILE_NAME: &str = "config.json";

/// Runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// GitHub API root (GitHub Enterprise: `https://host/api/v3`).
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Page size for listings.
    #[serde(default = "default_per_page")]
    pub per_page: u8,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_per_page() -> u8 {
    MAX_PER_PAGE
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_user_agent() -> String {
    concat!("ghex/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            per_page: default_per_page(),
            log_level: default_log_level(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Default config file location: `<config_dir>/ghex/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// if present, otherwise built-in defaults. Environment variables are
    /// applied last.
    pub fn load(explicit: Option<&Path>) -> ExploreResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::load_from_file(&path)?,
                None => Self::default(),
            },
        };

        config.load_from_env();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> ExploreResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExploreError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| ExploreError::Config(format!("{}: {e}", path.display())))
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        if let Ok(url) = std::env::var("GHEX_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        if let Ok(level) = std::env::var("GHEX_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.log_level = level;
            }
        }
    }

    /// REST client settings for this configuration and token.
    pub fn client_config(&self, token: Option<String>) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            token,
            per_page: self.per_page,
            user_agent: self.user_agent.clone(),
        }
    }
}
