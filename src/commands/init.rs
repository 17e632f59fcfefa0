use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use clap::Args;
use tracing::info;

use super::common::print_output;
use crate::infra::git::{GitConfigProvider, REMOTE_KEY, REPO_KEY, RepoId, USER_KEY};

#[derive(Args, Clone, PartialEq, Eq, Debug)]
pub struct InitArgs {
    /// GitHub login to act as
    #[arg(short, long, value_name = "LOGIN")]
    pub user: Option<String>,

    /// Repository to manage issues for, instead of the one the remote points at
    #[arg(short, long, value_name = "OWNER/REPO", value_parser = RepoId::from_str)]
    pub repo: Option<RepoId>,

    /// Remote whose URL names the repository
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let output = run_in(args, &cwd)?;
    print_output(&output)
}

/// Record the given settings in the local git config of the repository at `dir`,
/// then report what commands will use.
fn run_in(args: &InitArgs, dir: &Path) -> anyhow::Result<String> {
    let provider = GitConfigProvider::at(dir)?;
    let updates = [
        (USER_KEY, args.user.clone()),
        (REPO_KEY, args.repo.as_ref().map(RepoId::to_string)),
        (REMOTE_KEY, args.remote.clone()),
    ];
    for (key, value) in updates {
        if let Some(value) = value {
            provider.set_local(key, &value)?;
            info!(%key, %value, "Saved setting");
        }
    }

    // Settings are read from a snapshot taken when the provider was opened
    let provider = GitConfigProvider::at(dir)?;
    let remote = provider.remote_name();
    let project = provider.remote_project_identifier()?;
    let user = provider
        .current_user()
        .unwrap_or_else(|_| "(not set)".to_string());

    Ok(format!(
        "Repository: {project}\nRemote: {remote}\nUser: {user}\n"
    ))
}
