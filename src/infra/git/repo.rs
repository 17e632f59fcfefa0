//! Repository discovery.

use std::path::Path;

use git2::{Repository, RepositoryOpenFlags};

use super::error::{GitError, Result};

/// Open a git repository from the current directory or any parent.
pub fn open_repo() -> Result<Repository> {
    Repository::open_from_env().map_err(|_| GitError::NotInRepo)
}

/// Open a git repository from a specific path or any parent.
pub fn open_repo_at(path: &Path) -> Result<Repository> {
    Repository::open_ext(
        path,
        RepositoryOpenFlags::empty(),
        std::iter::empty::<&Path>(),
    )
    .map_err(|_| GitError::NotInRepo)
}

/// Get the current branch name, or `None` on a detached or unborn HEAD.
pub fn current_branch(repo: &Repository) -> Option<String> {
    let head = repo.head().ok()?;
    if !head.is_branch() {
        return None;
    }
    head.shorthand().map(str::to_string)
}

/// Get the URL of a named remote.
pub fn remote_url(repo: &Repository, remote: &str) -> Result<String> {
    let found = repo
        .find_remote(remote)
        .map_err(|_| GitError::NoRemote(remote.to_string()))?;
    found
        .url()
        .map(str::to_string)
        .ok_or_else(|| GitError::NoRemote(remote.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::git::test_utils::TempRepo;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::main("main")]
    #[case::master("master")]
    #[case::feature("feature/x")]
    fn test_current_branch(#[case] branch: &str) {
        let temp = TempRepo::new("owner", "repo", branch);
        let repo = temp.open();

        assert_eq!(current_branch(&repo).as_deref(), Some(branch));
    }

    #[test]
    fn test_current_branch_detached_head() {
        let temp = TempRepo::new("owner", "repo", "main");
        let repo = temp.open();
        let head = repo.head().unwrap().target().unwrap();
        repo.set_head_detached(head).unwrap();

        assert_eq!(current_branch(&repo), None);
    }

    #[test]
    fn test_open_repo_at_subdirectory() {
        let temp = TempRepo::new("owner", "repo", "main");
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert!(open_repo_at(&nested).is_ok());
    }

    #[test]
    fn test_open_repo_at_outside_repository() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(open_repo_at(dir.path()), Err(GitError::NotInRepo)));
    }

    #[test]
    fn test_remote_url() {
        let temp = TempRepo::new("octo", "hello", "main");
        let repo = temp.open();

        assert_eq!(
            remote_url(&repo, "origin").unwrap(),
            "https://github.com/octo/hello.git"
        );
        assert!(matches!(
            remote_url(&repo, "upstream"),
            Err(GitError::NoRemote(name)) if name == "upstream"
        ));
    }
}
