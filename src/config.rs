//! Configuration management for Prospect
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ProspectError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Prospect
///
/// This structure holds all configuration needed by the dashboard client,
/// including backend API settings, session storage behavior, and the
/// interactive dashboard defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Session storage configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Interactive dashboard configuration
    #[serde(default)]
    pub dash: DashConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// CSRF token attached as `X-CSRF-TOKEN` on every request when set
    ///
    /// The web frontend sources this from page metadata; here it comes from
    /// the config file or the `PROSPECT_CSRF_TOKEN` environment variable.
    #[serde(default)]
    pub csrf_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            csrf_token: None,
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the session file
    ///
    /// Defaults to the platform data directory when unset. Tests point this
    /// at a temporary directory through `PROSPECT_SESSION_DIR`.
    #[serde(default)]
    pub directory: Option<std::path::PathBuf>,

    /// Hours before a stored session counts as expired
    #[serde(default = "default_session_ttl_hours")]
    pub ttl_hours: i64,
}

fn default_session_ttl_hours() -> i64 {
    24
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            directory: None,
            ttl_hours: default_session_ttl_hours(),
        }
    }
}

/// Interactive dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    /// Tab shown after login: "commercials", "quotas", "prospections",
    /// "permissions" or "profile"
    #[serde(default = "default_dash_tab")]
    pub default_tab: String,

    /// Show the welcome banner when the dashboard starts
    #[serde(default = "default_show_banner")]
    pub show_banner: bool,
}

fn default_dash_tab() -> String {
    "commercials".to_string()
}

fn default_show_banner() -> bool {
    true
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            default_tab: default_dash_tab(),
            show_banner: default_show_banner(),
        }
    }
}

/// Tab names accepted by `dash.default_tab`
const VALID_TABS: [&str; 5] = [
    "commercials",
    "quotas",
    "prospections",
    "permissions",
    "profile",
];

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProspectError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ProspectError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("PROSPECT_API_BASE_URL") {
            tracing::debug!(base_url = %base_url, "Env override: PROSPECT_API_BASE_URL");
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("PROSPECT_API_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid PROSPECT_API_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(csrf) = std::env::var("PROSPECT_CSRF_TOKEN") {
            self.api.csrf_token = Some(csrf);
        }

        if let Ok(dir) = std::env::var("PROSPECT_SESSION_DIR") {
            tracing::debug!(dir = %dir, "Env override: PROSPECT_SESSION_DIR");
            self.session.directory = Some(std::path::PathBuf::from(dir));
        }

        if let Ok(ttl) = std::env::var("PROSPECT_SESSION_TTL_HOURS") {
            if let Ok(value) = ttl.parse() {
                self.session.ttl_hours = value;
            } else {
                tracing::warn!("Invalid PROSPECT_SESSION_TTL_HOURS: {}", ttl);
            }
        }

        if let Ok(tab) = std::env::var("PROSPECT_DEFAULT_TAB") {
            self.dash.default_tab = tab;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.api_base_url {
            tracing::debug!(base_url = %base_url, "CLI override: --api-base-url");
            self.api.base_url = base_url.clone();
        }

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set.
    ///
    /// # Returns
    ///
    /// Returns Ok if configuration is valid
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(ProspectError::Config("api.base_url cannot be empty".to_string()).into());
        }

        let parsed = url::Url::parse(&self.api.base_url)
            .map_err(|e| ProspectError::Config(format!("Invalid api.base_url: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ProspectError::Config(format!(
                "api.base_url must use http or https, got: {}",
                parsed.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(ProspectError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.ttl_hours <= 0 {
            return Err(ProspectError::Config(
                "session.ttl_hours must be greater than 0".to_string(),
            )
            .into());
        }

        if !VALID_TABS.contains(&self.dash.default_tab.as_str()) {
            return Err(ProspectError::Config(format!(
                "Invalid dash.default_tab: {}. Must be one of: {}",
                self.dash.default_tab,
                VALID_TABS.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            dash: DashConfig::default(),
        }
    }
}
