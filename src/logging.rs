//! Tracing subscriber setup.
//!
//! Command-line and web entry points log to stderr. The terminal editor
//! owns the screen, so it logs to a file in the config directory instead.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::constants::LOG_FILE_NAME;

/// Default filter directive for the given verbosity.
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "electropanel=debug"
    } else {
        "electropanel=warn"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(verbose).into())
}

/// Initializes logging to stderr. `RUST_LOG` overrides the default level.
pub fn init_stderr(verbose: bool) {
    let installed = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(%err, "stderr logging skipped, a subscriber is already installed");
    }
}

/// Initializes logging to `path`, appending.
pub fn init_file(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let installed = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(%err, path = %path.display(), "file logging skipped, a subscriber is already installed");
    }
    Ok(())
}

/// Location of the editor log file.
pub fn log_file_path() -> Result<PathBuf> {
    Ok(Config::config_dir()?.join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "electropanel=warn");
        assert_eq!(default_directive(true), "electropanel=debug");
    }

    #[test]
    fn test_init_file_creates_log() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("test.log");
        init_file(&path, true).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_repeated_init_keeps_first_subscriber() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        init_stderr(false);
        init_stderr(true);
        let path = temp_dir.path().join("second.log");
        assert!(init_file(&path, false).is_ok());
        assert!(path.exists());
    }
}
