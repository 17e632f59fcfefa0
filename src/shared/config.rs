use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use super::dirs;
use crate::infra::github::DEFAULT_API_URL;

/// Top-level configuration for git-issues.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Editor override.
    #[serde(default)]
    pub editor: EditorConfig,

    /// Pager override.
    #[serde(default)]
    pub pager: PagerConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// GitHub API configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// Base URL of the REST API (default: "https://api.github.com").
    /// Set this for GitHub Enterprise, e.g. "https://ghe.example.com/api/v3".
    #[serde(default = "default_api_url")]
    #[schemars(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

/// Editor configuration.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Editor command used instead of the one git would use.
    /// The buffer path is appended as the last argument.
    pub command: Option<String>,
}

/// Pager configuration.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PagerConfig {
    /// Pager command used instead of the one git would use.
    /// Set to "cat" or "" to disable paging.
    pub command: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Log filter for stderr, e.g. "info" or "git_issues=debug" (default: "warn").
    pub level: Option<String>,

    /// Directory for a JSON log file (git-issues.log). No file is written when unset.
    pub dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Load configuration from ~/.config/git-issues/config.ya?ml.
/// Returns Config::default() if no config file exists.
pub fn load_config() -> Result<Config, ConfigError> {
    let Some(dir) = dirs::app_config_dir() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir)
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> Result<Config, ConfigError> {
    for filename in &["config.yaml", "config.yml"] {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }),
        }
    }

    Ok(Config::default())
}

fn parse_config(content: &str, path: &Path) -> Result<Config, ConfigError> {
    // An empty file deserializes as null rather than an empty mapping
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
