//! Editor session: one temporary buffer, one blocking run of the user's editor.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempPath;
use tracing::{debug, warn};

use super::error::{MessageError, Result};
use crate::shared::command::{CommandLine, split_command};

/// Something that lets a human edit text and hands the result back.
pub trait Editor {
    fn edit(&self, initial: &str) -> Result<String>;
}

/// Runs the configured editor command against a temporary buffer.
///
/// The buffer is removed on every exit path, including editor failures.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
    temp_dir: Option<PathBuf>,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            temp_dir: None,
        }
    }

    /// Create buffers in `dir` instead of the system temp directory.
    #[cfg(test)]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    fn create_buffer(&self, initial: &str) -> Result<TempPath> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("git-issues-").suffix(".md");
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(initial.as_bytes())?;
        file.flush()?;
        Ok(file.into_temp_path())
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, initial: &str) -> Result<String> {
        let buffer = self.create_buffer(initial)?;

        let outcome = run_editor(&self.command, &buffer)
            .and_then(|()| fs::read_to_string(&buffer).map_err(MessageError::from));

        let path = buffer.to_path_buf();
        if let Err(e) = buffer.close()
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(path = %path.display(), error = %e, "Failed to remove editor buffer");
        }

        outcome
    }
}

/// Characters that make git hand an editor command to `sh` instead of running it directly.
#[cfg(unix)]
const SHELL_METACHARS: &[char] = &[
    '|', '&', ';', '<', '>', '(', ')', '$', '`', '\\', '"', '\'', ' ', '\t', '\n', '*', '?',
    '[', '#', '~', '=', '%',
];

/// Build the process for `command path` the way git launches `GIT_EDITOR`.
fn editor_process(command: &str, path: &Path) -> Result<Command> {
    if command.trim().is_empty() {
        return Err(MessageError::EditorAborted("no editor configured".to_string()));
    }

    #[cfg(unix)]
    if command.contains(SHELL_METACHARS) {
        let mut process = Command::new("sh");
        process
            .arg("-c")
            .arg(format!("{command} \"$@\""))
            .arg(command)
            .arg(path);
        return Ok(process);
    }

    let CommandLine { program, args } = split_command(command)
        .map_err(MessageError::EditorAborted)?
        .ok_or_else(|| MessageError::EditorAborted("no editor configured".to_string()))?;
    let mut process = Command::new(program);
    process.args(args).arg(path);
    Ok(process)
}

fn run_editor(command: &str, path: &Path) -> Result<()> {
    debug!(editor = %command, path = %path.display(), "Launching editor");
    let mut child = editor_process(command, path)?.spawn().map_err(|e| {
        MessageError::EditorAborted(format!("failed to launch editor '{command}': {e}"))
    })?;

    let status = {
        let _interrupts = IgnoreInterrupts::install();
        child.wait()
    }
    .map_err(|e| MessageError::EditorAborted(format!("failed to wait for editor: {e}")))?;

    if !status.success() {
        return Err(MessageError::EditorAborted(format!(
            "editor '{command}' exited with {status}"
        )));
    }
    Ok(())
}

/// Keeps Ctrl-C/Ctrl-\ typed inside the editor from killing this process
/// before the buffer is cleaned up. Installed only after the editor has been
/// spawned, so the editor itself keeps the default dispositions.
#[cfg(unix)]
struct IgnoreInterrupts {
    previous: Vec<(libc::c_int, libc::sighandler_t)>,
}

#[cfg(unix)]
impl IgnoreInterrupts {
    fn install() -> Self {
        let previous = [libc::SIGINT, libc::SIGQUIT]
            .into_iter()
            .filter_map(|signal| {
                // SAFETY: SIG_IGN is a valid disposition for SIGINT/SIGQUIT; the
                // previous handler is restored on drop.
                let handler = unsafe { libc::signal(signal, libc::SIG_IGN) };
                (handler != libc::SIG_ERR).then_some((signal, handler))
            })
            .collect();
        Self { previous }
    }
}

#[cfg(unix)]
impl Drop for IgnoreInterrupts {
    fn drop(&mut self) {
        for &(signal, handler) in &self.previous {
            // SAFETY: `handler` was returned by `signal` for this signal number.
            unsafe {
                libc::signal(signal, handler);
            }
        }
    }
}

#[cfg(not(unix))]
struct IgnoreInterrupts;

#[cfg(not(unix))]
impl IgnoreInterrupts {
    fn install() -> Self {
        Self
    }
}
