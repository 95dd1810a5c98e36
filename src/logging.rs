//! Tracing setup
//!
//! The TUI owns the terminal, so interactive runs log to a file that is
//! truncated on every start. One-shot commands log to stderr.
//!
//! Filtering follows `RUST_LOG` (default `bookfinder=info`). Set
//! `LOG_FORMAT=json` for JSON lines.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::{BookFinderError, Result};

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `bookfinder.log` next to the config file, or in the working directory
    pub fn default_file() -> Self {
        let dir = Config::config_dir().unwrap_or_else(|| PathBuf::from("."));
        LogTarget::File(dir.join("bookfinder.log"))
    }
}

fn build_filter() -> Result<EnvFilter> {
    let directive = "bookfinder=info"
        .parse::<Directive>()
        .map_err(|e| BookFinderError::Config(format!("log directive: {}", e)))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?)
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(target: &LogTarget) -> Result<()> {
    let filter = build_filter()?;
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match (target, use_json) {
        (LogTarget::Stderr, true) => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        (LogTarget::Stderr, false) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init(),
        (LogTarget::File(path), json) => {
            let file = Mutex::new(open_log_file(path)?);
            if json {
                registry
                    .with(tracing_subscriber::fmt::layer().json().with_writer(file))
                    .try_init()
            } else {
                registry
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .try_init()
            }
        }
    };

    installed.map_err(|e| BookFinderError::Config(format!("logging already initialised: {}", e)))
}
