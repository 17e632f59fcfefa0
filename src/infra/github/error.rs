//! GitHub API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Failed to get GitHub token: {0}")]
    TokenError(String),

    #[error("GitHub API error: {message} (HTTP {status}){}", format_error_details(.details))]
    Api {
        status: u16,
        message: String,
        details: Vec<serde_json::Value>,
    },

    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid GitHub API URL: {0}")]
    InvalidApiUrl(String),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Format error details from GitHub API errors array.
/// Returns a formatted string like "[field1 is code1, field2 is code2]" or empty string.
fn format_error_details(errors: &[serde_json::Value]) -> String {
    let error_details: Vec<String> = errors
        .iter()
        .filter_map(|e| {
            let field = e.get("field").and_then(|v| v.as_str());
            let code = e.get("code").and_then(|v| v.as_str());
            match (field, code) {
                (Some(f), Some(c)) => Some(format!("{f} is {c}")),
                (Some(f), None) => Some(f.to_string()),
                (None, Some(c)) => Some(c.to_string()),
                (None, None) => None,
            }
        })
        .collect();

    if error_details.is_empty() {
        String::new()
    } else {
        format!(" [{}]", error_details.join(", "))
    }
}
