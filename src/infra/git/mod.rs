//! Git operations using git2 (libgit2).
//!
//! Provides the repository settings every command starts from: which editor
//! and pager to run, who the user is, and which GitHub project to talk to.

mod error;
mod github;
mod repo;
mod settings;
#[cfg(test)]
pub mod test_utils;

pub use github::RepoId;
pub use settings::{GitConfigProvider, REMOTE_KEY, REPO_KEY, USER_KEY};
