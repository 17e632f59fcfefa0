//! Tracing subscriber setup.
//!
//! Human-readable events go to stderr so they never mix with paged output on
//! stdout. When a log directory is configured, the same events are also
//! written as JSON lines to `<dir>/git-issues.log`.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE: &str = "git-issues.log";

/// Keeps the file writer flushing until dropped; hold it for the whole of `main`.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Pick the log filter directive.
///
/// `-v` flags win over `GIT_ISSUES_LOG`, which wins over the config file.
pub fn resolve_filter(verbosity: u8, env: Option<&str>, config: Option<&str>) -> String {
    let from_flags = match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    from_flags
        .or(env)
        .or(config)
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global subscriber.
pub fn init(filter: &str, dir: Option<&Path>) -> Result<LogGuard> {
    let env_filter = || {
        EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter: {filter}"))
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(env_filter()?);

    let (file_layer, guard) = match dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(rolling::never(dir, LOG_FILE));
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_current_span(true)
                .with_filter(env_filter()?);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LogGuard { _file: guard })
}
