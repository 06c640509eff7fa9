//! Configuration management for the HookSync CLI.
//!
//! This module provides functionality for loading the configuration file
//! of the HookSync CLI application. The configuration names the GitHub organization
//! that owns the repositories, how to authenticate against GitHub, and where the
//! tracked webhook state is kept.
//!
//! The configuration is stored in TOML format and can be loaded from a specified
//! file path or from the default location in the current directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "hook-sync.toml";

/// Default state file name
pub const DEFAULT_STATE_FILENAME: &str = "hook-sync-state.json";

/// Default environment variable holding the personal access token
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the HookSync CLI application.
///
/// # Example TOML Configuration
///
/// ```toml
/// [github]
/// owner = "my-org"
///
/// [authentication]
/// auth_method = "token"
/// token_env = "GITHUB_TOKEN"
///
/// [state]
/// path = "hook-sync-state.json"
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// GitHub organization and API settings
    pub github: GitHubConfig,

    /// Authentication settings
    #[serde(default)]
    pub authentication: AuthenticationConfig,

    /// Location of the tracked webhook state
    #[serde(default)]
    pub state: StateConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if:
    /// - The specified file does not exist
    /// - The file cannot be read due to permissions or I/O issues
    /// - The file contains invalid TOML syntax or does not match the expected schema
    /// - No GitHub owner is configured
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use hook_sync_cli::config::AppConfig;
    ///
    /// let config_path = Path::new("./hook-sync.toml");
    /// match AppConfig::load(config_path) {
    ///     Ok(config) => println!("Managing webhooks for {}", config.github.owner),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        if config.github.owner.trim().is_empty() {
            return Err(Error::Config(
                "The GitHub owner must be set in the [github] section".to_string(),
            ));
        }

        Ok(config)
    }

    /// Returns the state file to use, preferring the path given on the command line.
    pub fn state_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.state.path.clone())
    }
}

/// GitHub settings.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Organization or user that owns the repositories
    pub owner: String,

    /// API root for GitHub Enterprise Server; defaults to `https://api.github.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Configuration for CLI authentication settings.
///
/// Two methods are supported:
/// - `token`: a personal access token read from the environment variable named by
///   `token_env`
/// - `app`: a GitHub App installation, which needs `app_id`, `installation_id` and
///   `private_key_path`
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticationConfig {
    #[serde(default = "AuthenticationConfig::default_auth_method")]
    pub auth_method: String,

    #[serde(default = "AuthenticationConfig::default_token_env")]
    pub token_env: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_path: Option<PathBuf>,
}

impl AuthenticationConfig {
    fn default_auth_method() -> String {
        "token".to_string()
    }

    fn default_token_env() -> String {
        DEFAULT_TOKEN_ENV.to_string()
    }
}

impl Default for AuthenticationConfig {
    fn default() -> Self {
        Self {
            auth_method: AuthenticationConfig::default_auth_method(),
            token_env: AuthenticationConfig::default_token_env(),
            app_id: None,
            installation_id: None,
            private_key_path: None,
        }
    }
}

/// Configuration for the tracked webhook state.
#[derive(Debug, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path of the JSON state file
    #[serde(default = "StateConfig::default_path")]
    pub path: PathBuf,
}

impl StateConfig {
    fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_STATE_FILENAME)
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: StateConfig::default_path(),
        }
    }
}

/// Resolves the path to the configuration file.
///
/// - If `config_path` is `Some(path)`, returns that path as a `PathBuf`
/// - If `config_path` is `None`, returns `./hook-sync.toml` in the current directory
/// - Falls back to the current directory if unable to determine the working directory
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
