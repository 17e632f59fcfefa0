//! Centralized reader for GIT_ISSUES_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const TOKEN: &str = "GIT_ISSUES_TOKEN";
const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
const API_URL: &str = "GIT_ISSUES_API_URL";
const LOG: &str = "GIT_ISSUES_LOG";

/// Snapshot of the environment variables read by git-issues at load time.
#[derive(Debug, Default)]
pub struct EnvVars {
    /// API token, from `GIT_ISSUES_TOKEN` or else `GITHUB_TOKEN`.
    pub token: Option<String>,

    /// Overrides `github.api_url` from the config file.
    pub api_url: Option<String>,

    /// Log filter directive, e.g. "debug" or "git_issues=trace".
    pub log: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl EnvVars {
    /// Read the environment variables from the current process.
    pub fn load() -> Self {
        Self {
            token: non_empty_var(TOKEN).or_else(|| non_empty_var(GITHUB_TOKEN)),
            api_url: non_empty_var(API_URL),
            log: non_empty_var(LOG),
        }
    }
}
