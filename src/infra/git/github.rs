//! GitHub repository identifiers.

use std::fmt;
use std::str::FromStr;

use lazy_regex::regex_captures;

use super::error::{GitError, Result};

/// `owner/name` of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = GitError;

    /// Parse `owner/repo`. Only the first slash splits, so `a/b/c` is `("a", "b/c")`.
    fn from_str(repo: &str) -> Result<Self> {
        repo.split_once('/')
            .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
            .map(|(owner, name)| Self::new(owner, name))
            .ok_or_else(|| {
                GitError::InvalidInput(format!(
                    "Invalid repository format: {repo}. Expected owner/repo"
                ))
            })
    }
}

/// Parse owner and repo from a GitHub remote URL.
/// Supports both SSH (git@github.com:owner/repo.git) and HTTPS formats.
pub fn parse_github_url(url: &str) -> Result<RepoId> {
    let (_, owner, name) =
        regex_captures!(r"(?:github\.com[:/])([^/]+)/([^/]+?)(?:\.git)?/?$", url)
            .ok_or_else(|| GitError::InvalidGitHubUrl(url.to_string()))?;
    Ok(RepoId::new(owner, name))
}
