//! Logging initialization
//!
//! Console logging via `tracing-subscriber`, with optional JSON formatting
//! and optional daily-rotated file output. The returned guard must be held
//! for the lifetime of the process so buffered file output is flushed.

use crate::config::LoggingConfig;
use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    let mut guard = None;
    let file_layer = if config.file_enabled {
        let appender =
            tracing_appender::rolling::daily(&config.file_directory, &config.file_prefix);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        guard = Some(worker_guard);
        Some(fmt::layer().with_writer(writer).with_ansi(false))
    } else {
        None
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if config.json {
        registry
            .with(fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {e}"))?;
    } else {
        registry
            .with(fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {e}"))?;
    }

    Ok(guard)
}
