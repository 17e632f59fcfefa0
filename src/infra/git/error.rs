//! Git error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository (or any of the parent directories)")]
    NotInRepo,

    #[error("No remote '{0}' configured")]
    NoRemote(String),

    #[error("Could not parse GitHub URL: {0}")]
    InvalidGitHubUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No user configured. Run `git issues init --user LOGIN` or set user.name")]
    NoUser,

    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, GitError>;
