//! Logging setup for hosts embedding the obfuscator.
//!
//! The library itself only emits `tracing` events. A host (serverless handler,
//! batch job, test harness) calls [`init`] once to decide where they go:
//!
//! - **stdout**: always, plain text unless `ansi` is set, which is what log
//!   collectors in function runtimes expect.
//! - **rotating files**: when `log_dir` is set, daily rotation keeping
//!   `max_log_files` files.
//!
//! ```no_run
//! use pii_obfuscator::logging::{self, LoggingConfig};
//!
//! logging::init(&LoggingConfig::default()).expect("Failed to initialize logging");
//! tracing::info!("Handler ready");
//! ```

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub ansi: bool,
    pub log_dir: Option<PathBuf>,
    pub max_log_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            ansi: false,
            log_dir: None,
            max_log_files: 10,
        }
    }
}

fn ensure_log_dir(log_dir: &Path) -> Result<()> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }
    Ok(())
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log directory cannot be
/// created, or a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(config.ansi);

    let file_layer = match &config.log_dir {
        Some(log_dir) => {
            ensure_log_dir(log_dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(config.max_log_files)
                .filename_prefix("obfuscator")
                .filename_suffix("log")
                .build(log_dir)
                .context("Failed to create file appender")?;

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(appender),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::debug!(log_dir = ?config.log_dir, "Logging initialized");
    Ok(())
}
