// 📝 Logging setup
//
// The TUI owns the terminal, so it logs to a file. The server and the
// plain CLI commands log to stdout.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

/// File logging under `log_dir`. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_file(config: &AppConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log dir {}", config.log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&config.log_dir, "ledger-quest.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(filter(config))
        .try_init()
        .context("Failed to install logger")?;

    Ok(guard)
}

pub fn init_stdout(config: &AppConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter(config))
        .try_init()
        .context("Failed to install logger")?;
    Ok(())
}
