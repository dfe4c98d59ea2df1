use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::github::types::DateQualifier;

const DEFAULT_CONFIG_FILE: &str = ".repo-pulse.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .repo-pulse.toml.
///
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Outbound GitHub API settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// HTTP service bind settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Query behaviour settings
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
    /// REST API base URL, without a trailing slash
    pub api_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: "https://api.github.com".to_string(),
            timeout_secs: 30,
            user_agent: "repo-pulse".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Search qualifier the date-range query filters on
    pub date_qualifier: DateQualifier,
}

impl Config {
    /// Load configuration from `path`, or from .repo-pulse.toml in the
    /// current directory when no path is given.
    ///
    /// A missing default file yields `Config::default()`; a missing explicit
    /// file is an error. Environment overrides are applied once here so the
    /// rest of the program never reads ambient credentials.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env(
            std::env::var("GITHUB_TOKEN").ok(),
            std::env::var("GITHUB_API_URL").ok(),
        );
        Ok(config)
    }

    /// Load from a specific path without environment overrides.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Token from the file wins over GITHUB_TOKEN; GITHUB_API_URL always
    /// wins over the file so runners on enterprise hosts work unchanged.
    fn apply_env(&mut self, token: Option<String>, api_url: Option<String>) {
        if self.github.token.is_none() {
            self.github.token = token.filter(|t| !t.is_empty());
        }
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.github.api_url = url;
        }
        let trimmed = self.github.api_url.trim_end_matches('/').len();
        self.github.api_url.truncate(trimmed);
    }
}
