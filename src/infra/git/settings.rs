//! Repository-level settings: editor, pager, identity and target project.
//!
//! Resolution mirrors `git var` for the editor and pager, so `git issues`
//! opens the same editor as `git commit`.

use std::path::Path;

use git2::{ConfigLevel, Repository};
use tracing::debug;

use super::error::{GitError, Result};
use super::github::{RepoId, parse_github_url};
use super::repo::{current_branch, open_repo, open_repo_at, remote_url};

pub const DEFAULT_EDITOR: &str = "vi";
pub const DEFAULT_PAGER: &str = "less";
const DEFAULT_REMOTE: &str = "origin";

/// Local git config keys written by `git issues init`.
pub const USER_KEY: &str = "issues.user";
pub const REPO_KEY: &str = "issues.repo";
pub const REMOTE_KEY: &str = "issues.remote";

/// Settings resolved once at startup and passed to commands by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSettings {
    pub editor_command: String,
    pub pager_command: String,
    pub user: String,
    pub project: RepoId,
}

/// Reads settings from a repository's git config and the process environment.
pub struct GitConfigProvider {
    repo: Repository,
    config: git2::Config,
}

impl GitConfigProvider {
    /// Use the repository containing the current directory.
    pub fn discover() -> Result<Self> {
        Self::from_repo(open_repo()?)
    }

    /// Use the repository containing `path`.
    pub fn at(path: &Path) -> Result<Self> {
        Self::from_repo(open_repo_at(path)?)
    }

    fn from_repo(repo: Repository) -> Result<Self> {
        let config = repo.config()?.snapshot()?;
        Ok(Self { repo, config })
    }

    fn get(&self, key: &str) -> Option<String> {
        self.config
            .get_string(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    /// `GIT_EDITOR`, `core.editor`, `VISUAL`, `EDITOR`, then `vi`.
    pub fn editor_command(&self) -> String {
        first_set([
            env_var("GIT_EDITOR"),
            self.get("core.editor"),
            env_var("VISUAL"),
            env_var("EDITOR"),
        ])
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }

    /// `GIT_PAGER`, `core.pager`, `PAGER`, then `less`.
    pub fn pager_command(&self) -> String {
        first_set([
            env_var("GIT_PAGER"),
            self.get("core.pager"),
            env_var("PAGER"),
        ])
        .unwrap_or_else(|| DEFAULT_PAGER.to_string())
    }

    /// `issues.user`, `github.user`, then `user.name`.
    pub fn current_user(&self) -> Result<String> {
        first_set([
            self.get(USER_KEY),
            self.get("github.user"),
            self.get("user.name"),
        ])
        .ok_or(GitError::NoUser)
    }

    /// Remote whose URL names the target project.
    ///
    /// `issues.remote`, the current branch's remote, the remote of `master` or
    /// `main`, then `origin`.
    pub fn remote_name(&self) -> String {
        let branch_remote = |branch: &str| {
            self.get(&format!("branch.{branch}.remote"))
                // "." tracks a local branch, not a remote
                .filter(|remote| remote != ".")
        };
        first_set([
            self.get(REMOTE_KEY),
            current_branch(&self.repo).and_then(|branch| branch_remote(&branch)),
            branch_remote("master"),
            branch_remote("main"),
        ])
        .unwrap_or_else(|| DEFAULT_REMOTE.to_string())
    }

    /// `owner/repo` from `issues.repo`, else parsed from the remote's URL.
    pub fn remote_project_identifier(&self) -> Result<RepoId> {
        if let Some(repo) = self.get(REPO_KEY) {
            return repo.parse();
        }
        let remote = self.remote_name();
        let url = remote_url(&self.repo, &remote)?;
        debug!(%remote, %url, "Resolved remote");
        parse_github_url(&url)
    }

    /// Resolve everything a command needs.
    pub fn settings(&self) -> Result<RepoSettings> {
        let settings = RepoSettings {
            editor_command: self.editor_command(),
            pager_command: self.pager_command(),
            user: self.current_user()?,
            project: self.remote_project_identifier()?,
        };
        debug!(?settings, "Resolved repository settings");
        Ok(settings)
    }

    /// Write `key = value` to the repository's local config.
    ///
    /// Values read through this provider are a snapshot and do not change.
    pub fn set_local(&self, key: &str, value: &str) -> Result<()> {
        let mut local = self.repo.config()?.open_level(ConfigLevel::Local)?;
        local.set_str(key, value)?;
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn first_set<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().next()
}
