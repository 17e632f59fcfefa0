//! Credential resolution for the GitHub API.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::process::Command;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use tracing::debug;

use super::error::{GitHubError, Result};
use crate::shared::command::is_command_available;

/// Username and secret sent as HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Resolve credentials for `user_input`.
///
/// `login:secret` is used verbatim. Otherwise the secret comes from `env_token`,
/// then `gh auth token`, then an interactive prompt.
pub fn resolve_auth(user_input: &str, env_token: Option<&str>) -> Result<Credentials> {
    if let Some((username, secret)) = user_input.split_once(':') {
        debug!(%username, "Using credentials embedded in user");
        return credentials(username, secret.to_string());
    }

    if let Some(token) = env_token {
        debug!("Using token from environment");
        return credentials(user_input, token.to_string());
    }

    if is_command_available("gh") {
        match get_gh_token() {
            Ok(token) => {
                debug!("Using token from gh auth token");
                return credentials(user_input, token);
            }
            Err(e) => debug!(error = %e, "gh auth token unavailable"),
        }
    }

    let secret = prompt_secret(&format!("GitHub token for {user_input}: "))?;
    credentials(user_input, secret)
}

fn credentials(username: &str, secret: String) -> Result<Credentials> {
    let secret = secret.trim();
    if username.is_empty() {
        return Err(GitHubError::TokenError("empty username".to_string()));
    }
    if secret.is_empty() {
        return Err(GitHubError::TokenError(format!(
            "empty token for {username}"
        )));
    }
    Ok(Credentials::new(username, secret))
}

/// Get GitHub token from `gh auth token` command.
/// This reuses the authentication from GitHub CLI.
fn get_gh_token() -> Result<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .map_err(|e| GitHubError::TokenError(format!("failed to run gh auth token: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitHubError::TokenError(format!(
            "gh auth token failed: {}",
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(GitHubError::TokenError(
            "gh auth token returned empty token".to_string(),
        ));
    }

    Ok(token)
}

/// Read a secret from the terminal without echo, or a plain line when stdin
/// is not a terminal.
fn prompt_secret(prompt: &str) -> Result<String> {
    let prompt_err = |e: io::Error| GitHubError::TokenError(format!("cannot read token: {e}"));

    let mut stderr = io::stderr();
    write!(stderr, "{prompt}").map_err(prompt_err)?;
    stderr.flush().map_err(prompt_err)?;

    if !io::stdin().is_tty() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).map_err(prompt_err)?;
        return Ok(line);
    }

    let secret = {
        let _raw = RawModeGuard::enable().map_err(prompt_err)?;
        read_hidden_line()
    };
    writeln!(stderr).map_err(prompt_err)?;
    secret.map_err(prompt_err)
}

fn read_hidden_line() -> io::Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "cancelled"));
            }
            KeyCode::Char(c) => secret.push(c),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Esc => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "cancelled"));
            }
            _ => {}
        }
    }
}

/// Keeps the terminal in raw mode until dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}
