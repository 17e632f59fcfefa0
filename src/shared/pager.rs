//! Paged output through the user's pager.

use std::io::{self, Write};
use std::process::{Child, Command, Stdio};

use crossterm::tty::IsTty;
use tracing::{debug, warn};

use super::command::{CommandLine, find_command_path, split_command};

/// Writes long output through a pager when stdout is a terminal.
pub struct Pager {
    command: String,
}

impl Pager {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Show `content`, through the pager when there is one to use.
    /// Broken pipes (the user quit the pager early) are not errors.
    pub fn show(&self, content: &str) -> io::Result<()> {
        let pager = self.pager_for(io::stdout().is_tty());
        match page_or_print(pager.as_ref(), content, &mut io::stdout().lock()) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
    }

    /// The pager to run, or `None` to print directly.
    fn pager_for(&self, stdout_is_tty: bool) -> Option<CommandLine> {
        if !stdout_is_tty {
            return None;
        }
        let pager = match split_command(&self.command) {
            Ok(Some(pager)) => pager,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Ignoring pager");
                return None;
            }
        };
        if pager.program == "cat" || find_command_path(&pager.program).is_none() {
            debug!(pager = %self.command, "Not paging");
            return None;
        }
        Some(pager)
    }
}

/// Send `content` to `pager`, or write it to `direct` when there is no pager
/// or it cannot be started. Nothing reaches `direct` once the pager runs.
fn page_or_print(
    pager: Option<&CommandLine>,
    content: &str,
    direct: &mut impl Write,
) -> io::Result<()> {
    if let Some(pager) = pager {
        match spawn_pager(pager) {
            Ok(child) => return feed_pager(child, content),
            Err(e) => {
                warn!(
                    pager = %pager.program,
                    error = %e,
                    "Pager failed to start; printing directly"
                );
            }
        }
    }
    direct.write_all(content.as_bytes())?;
    direct.flush()
}

fn spawn_pager(pager: &CommandLine) -> io::Result<Child> {
    let mut command = Command::new(&pager.program);
    command.args(&pager.args).stdin(Stdio::piped());
    if std::env::var_os("LESS").is_none() {
        command.env("LESS", "FRX");
    }
    command.spawn()
}

fn feed_pager(mut child: Child, content: &str) -> io::Result<()> {
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(content.as_bytes()),
        None => Ok(()),
    };
    // stdin is closed above so the pager sees EOF
    let status = child.wait()?;
    if let Err(e) = written
        && e.kind() != io::ErrorKind::BrokenPipe
    {
        return Err(e);
    }
    debug!(%status, "Pager exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    #[case::not_a_tty("less", false)]
    #[case::blank("  ", true)]
    #[case::cat("cat", true)]
    #[case::missing_program("definitely-not-a-real-pager-12345", true)]
    #[case::unbalanced_quotes("less 'oops", true)]
    fn test_prints_directly(#[case] command: &str, #[case] is_tty: bool) {
        assert_eq!(Pager::new(command).pager_for(is_tty), None);
    }

    #[test]
    fn test_pages_through_available_program() {
        let pager = Pager::new("sh -c 'cat'").pager_for(true).unwrap();
        assert_eq!(pager.program, "sh");
        assert_eq!(pager.args, vec!["-c".to_string(), "cat".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_pager_gets_content_on_stdin() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("paged.txt");
        let pager = split_command(&format!(
            r#"sh -c 'cat > "$0"; printf "%s" "$LESS" > "$0.less"' {}"#,
            out.display()
        ))
        .unwrap()
        .unwrap();

        let mut direct = Vec::new();
        temp_env::with_var_unset("LESS", || {
            page_or_print(Some(&pager), "line 1\nline 2\n", &mut direct).unwrap();
        });

        assert!(direct.is_empty());

        assert_eq!(fs::read_to_string(&out).unwrap(), "line 1\nline 2\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("paged.txt.less")).unwrap(),
            "FRX"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_pager_may_exit_early() {
        let pager = split_command("true").unwrap().unwrap();
        let content = "x\n".repeat(100_000);

        page_or_print(Some(&pager), &content, &mut Vec::new()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_pager_output_is_not_repeated() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("paged.txt");
        let pager = split_command(&format!(r#"sh -c 'cat > "$0"; exit 1' {}"#, out.display()))
            .unwrap()
            .unwrap();
        let mut direct = Vec::new();

        page_or_print(Some(&pager), "shown once\n", &mut direct).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "shown once\n");
        assert!(direct.is_empty());
    }

    #[test]
    fn test_pager_that_cannot_start_prints_directly() {
        let pager = CommandLine {
            program: "definitely-not-a-real-pager-12345".to_string(),
            args: Vec::new(),
        };
        let mut direct = Vec::new();

        page_or_print(Some(&pager), "text\n", &mut direct).unwrap();

        assert_eq!(direct, b"text\n");
    }
}
