//! Helpers for user-configured external commands (editor, pager, `gh`).

use std::path::{Path, PathBuf};

/// A command line split shell-style into program and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

/// Split `command` the way a shell would.
///
/// Returns `Ok(None)` for a blank command and `Err` when quoting is unbalanced.
pub fn split_command(command: &str) -> Result<Option<CommandLine>, String> {
    let mut argv =
        shlex::split(command).ok_or_else(|| format!("cannot parse command: {command}"))?;
    if argv.is_empty() {
        return Ok(None);
    }
    let program = argv.remove(0);
    Ok(Some(CommandLine {
        program,
        args: argv,
    }))
}

/// Check if a command is available in PATH.
pub fn is_command_available(cmd: &str) -> bool {
    find_command_path(cmd).is_some()
}

/// Find the full path of a command.
///
/// A command containing a path separator is checked as-is; otherwise the first
/// matching executable in PATH is returned.
pub fn find_command_path(cmd: &str) -> Option<PathBuf> {
    if cmd.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(cmd);
        return is_executable(&path).then_some(path);
    }

    let path_var = std::env::var_os("PATH")?;

    std::env::split_paths(&path_var).find_map(|dir| {
        let path = dir.join(cmd);
        if is_executable(&path) {
            Some(path)
        } else {
            None
        }
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.is_file()
        && path
            .metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
