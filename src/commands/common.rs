//! State and helpers shared by the issue and comment commands.

use std::io::{self, Write};

use anyhow::Context;
use crossterm::style::Color;
use crossterm::tty::IsTty;
use tracing::debug;

use crate::infra::git::{GitConfigProvider, RepoId};
use crate::infra::github::{GitHubClient, resolve_auth};
use crate::message::{Editor, ExternalEditor, Field};
use crate::shared::config::Config;
use crate::shared::diff::{write_colored_line, write_diff};
use crate::shared::env_var::EnvVars;
use crate::shared::pager::Pager;

/// Everything a command needs to talk to the remote and to the user,
/// resolved once at startup.
pub struct Session<E: Editor = ExternalEditor> {
    pub repo: RepoId,
    pub client: GitHubClient,
    pub editor: E,
    pub pager: Pager,
    /// Whether output may contain ANSI colors.
    pub color: bool,
}

impl Session {
    /// Resolve repository settings, credentials and the API client.
    ///
    /// Editor and pager from the config file win over git's.
    /// `GIT_ISSUES_API_URL` wins over `github.api_url`.
    pub fn start(config: &Config, env: &EnvVars) -> anyhow::Result<Self> {
        let settings = GitConfigProvider::discover()?.settings()?;

        let editor_command = config
            .editor
            .command
            .clone()
            .unwrap_or(settings.editor_command);
        let pager_command = config
            .pager
            .command
            .clone()
            .unwrap_or(settings.pager_command);
        let api_url = env.api_url.as_deref().unwrap_or(&config.github.api_url);
        debug!(%api_url, editor = %editor_command, pager = %pager_command, "Starting session");

        let credentials = resolve_auth(&settings.user, env.token.as_deref())?;
        let client = GitHubClient::new(api_url, credentials)?;

        Ok(Self {
            repo: settings.project,
            client,
            editor: ExternalEditor::new(editor_command),
            pager: Pager::new(pager_command),
            color: io::stdout().is_tty(),
        })
    }
}

impl<E: Editor> Session<E> {
    /// Show long output through the pager.
    pub fn page(&self, output: &str) -> anyhow::Result<()> {
        self.pager.show(output).context("Failed to write output")
    }
}

/// Print to stdout, ignoring BrokenPipe (e.g. when piped to `head`).
pub fn print_output(output: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e.into()),
        _ => Ok(()),
    }
}

/// Labels from the command line, where the single value `none` clears them.
pub fn labels_field(labels: &[String]) -> Field<Vec<String>> {
    match labels {
        [] => Field::Unset,
        [only] if only == "none" => Field::Cleared,
        _ => Field::Set(labels.to_vec()),
    }
}

/// A text attribute from the command line, where `none` clears it.
pub fn text_arg(value: Option<&str>) -> Field<String> {
    match value {
        None => Field::Unset,
        Some("none") => Field::Cleared,
        Some(value) => Field::Set(value.to_string()),
    }
}

/// Parse `--milestone`: a positive number, or `none` to clear it.
pub fn parse_milestone(value: &str) -> Result<Field<u64>, String> {
    if value == "none" {
        return Ok(Field::Cleared);
    }
    match value.parse::<u64>() {
        Ok(number) if number > 0 => Ok(Field::Set(number)),
        _ => Err(format!("expected a milestone number or 'none', got '{value}'")),
    }
}

/// Append a line diff of a multi-line attribute.
pub fn write_text_change(
    out: &mut Vec<u8>,
    old: &str,
    new: &str,
    use_color: bool,
) -> io::Result<()> {
    write_diff(out, &with_newline(old), &with_newline(new), use_color)
}

/// Append `-KEY: old` / `+KEY: new` lines for a single-line attribute.
pub fn write_field_change(
    out: &mut Vec<u8>,
    key: &str,
    old: &str,
    new: &str,
    use_color: bool,
) -> io::Result<()> {
    write_colored_line(out, &format!("-{key}: "), old, Color::Red, use_color)?;
    write_colored_line(out, &format!("+{key}: "), new, Color::Green, use_color)
}

fn with_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}
