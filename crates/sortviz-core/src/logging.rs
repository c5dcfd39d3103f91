//! Tracing setup.
//!
//! The terminal belongs to the UI (or to the headless narration on stdout),
//! so events go to a file through a non-blocking writer. `SORTVIZ_LOG`
//! overrides the configured filter.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "SORTVIZ_LOG";

/// Keeps the background writer alive; flushes on drop.
#[must_use = "dropping the guard stops the log writer"]
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

fn filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber writing to `config.file_path()`.
///
/// If a subscriber is already installed the new writer is dropped and the
/// existing one keeps receiving events.
pub fn init(config: &LogConfig) -> Result<LogGuard> {
    let path = config.file_path();
    let dir = path
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or_default();
    let file_name = path
        .file_name()
        .context("log file path has no file name")?
        .to_owned();
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();

    Ok(LogGuard {
        _guard: installed.then_some(guard),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_init_creates_log_directory() {
        let dir = tempdir().unwrap();
        let config = LogConfig {
            level: "debug".to_string(),
            file: dir
                .path()
                .join("nested")
                .join("run.log")
                .to_string_lossy()
                .to_string(),
        };

        let _guard = init(&config).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
