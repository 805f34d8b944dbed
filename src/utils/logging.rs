//! Logging initialization
//!
//! Console output plus a persistent log file recording the timestamped
//! call-usage lines for each run

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging system
///
/// Installs two sinks behind one env filter: a human-readable console layer
/// and an ANSI-free layer appending to the usage log file. Call once at
/// process start, before any other component runs.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.usage_log_file)
        .with_context(|| {
            format!(
                "Failed to open log file {}",
                config.usage_log_file.display()
            )
        })?;

    let filter =
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    Ok(())
}
