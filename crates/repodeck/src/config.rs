//! Configuration loading.
//!
//! Configuration is resolved with the following precedence (highest first):
//! 1. CLI flags (applied by the caller)
//! 2. Environment variables (`GITHUB_TOKEN`, `REPODECK_API_BASE`)
//! 3. YAML file (`--config PATH`, or `$REPODECK_CONFIG`)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```yaml
//! api_base: https://api.github.com
//! token: ghp_...            # or use GITHUB_TOKEN
//! user_agent: repodeck
//! page_size: 10
//! fetch_per_page: 100
//! timeout_secs: 30
//! available_sizes: [3, 10, 20, 50]
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, Result};

/// Public GitHub REST API origin.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "REPODECK_CONFIG";
/// Environment variable holding an API token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Environment variable overriding the API origin.
pub const API_BASE_ENV: &str = "REPODECK_API_BASE";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GitHub API origin, without a trailing slash.
    pub api_base: String,
    /// Static API token sent as a bearer token.
    pub token: Option<String>,
    /// `User-Agent` header value (GitHub rejects requests without one).
    pub user_agent: String,
    /// Rows per page when a list page opens.
    pub page_size: usize,
    /// Repositories requested from the search endpoint (1..=100).
    pub fetch_per_page: u32,
    /// Request timeout.
    pub timeout_secs: u64,
    /// Page sizes offered by the pagination controls.
    pub available_sizes: Vec<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            user_agent: format!("repodeck/{}", env!("CARGO_PKG_VERSION")),
            page_size: 10,
            fetch_per_page: 100,
            timeout_secs: 30,
            available_sizes: vec![3, 10, 20, 50],
        }
    }
}

impl Config {
    /// Loads configuration from `path`, `$REPODECK_CONFIG` or defaults, then
    /// applies environment overrides and validates.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading the environment through `env`.
    pub fn load_with<F>(path: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).filter(|p| !p.is_empty()).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Config::default(),
        };
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Parses a YAML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&text)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Parses YAML text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(text)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = env(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.token = Some(token.trim().to_string());
        }
        if let Some(base) = env(API_BASE_ENV).filter(|b| !b.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
    }

    /// Rejects values the rest of the application cannot work with.
    pub fn validate(&mut self) -> Result<()> {
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(AppError::Config(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        if self.page_size == 0 {
            return Err(AppError::Config("page_size must be at least 1".into()));
        }
        if !(1..=100).contains(&self.fetch_per_page) {
            return Err(AppError::Config(format!(
                "fetch_per_page must be between 1 and 100, got {}",
                self.fetch_per_page
            )));
        }
        if self.available_sizes.contains(&0) {
            return Err(AppError::Config("available_sizes cannot contain 0".into()));
        }
        self.available_sizes.sort_unstable();
        self.available_sizes.dedup();
        if self.user_agent.trim().is_empty() {
            return Err(AppError::Config("user_agent cannot be empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
