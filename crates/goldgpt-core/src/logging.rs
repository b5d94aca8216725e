//! File logging.
//!
//! The TUI owns the terminal, so logs go to `$GOLDGPT_HOME/logs/goldgpt.log`
//! through a non-blocking writer. Keep the returned guard alive for the life
//! of the process or buffered lines are lost.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, paths};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";
const LOG_FILE: &str = "goldgpt.log";

/// Environment variable holding filter directives.
pub const LOG_FILTER_ENV: &str = "GOLDGPT_LOG";

pub struct LoggingHandle {
    pub guard: WorkerGuard,
}

/// Installs the global subscriber.
///
/// Filter precedence: `GOLDGPT_LOG` > `RUST_LOG` > config `log_filter` > default.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber is
/// already installed.
pub fn init(config: &Config) -> Result<LoggingHandle> {
    init_in(&paths::logs_dir(), config)
}

/// Installs the global subscriber writing into `log_dir`.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber is
/// already installed.
pub fn init_in(log_dir: &Path, config: &Config) -> Result<LoggingHandle> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let filter = resolve_filter(config);
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        component = "logging",
        version = env!("CARGO_PKG_VERSION"),
        "logging initialized"
    );

    Ok(LoggingHandle { guard })
}

fn resolve_filter(config: &Config) -> EnvFilter {
    std::env::var(LOG_FILTER_ENV)
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| {
            config
                .log_filter
                .as_deref()
                .and_then(|value| EnvFilter::try_new(value).ok())
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
