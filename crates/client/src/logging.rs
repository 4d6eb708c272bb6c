//! Tracing subscriber setup for the binary.

use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber: `RUST_LOG`-driven filter (default `info`),
/// a stderr layer, and a file layer under `log_dir` when one is given.
///
/// The returned guard flushes the file writer on drop; keep it alive until exit.
pub fn setup_logging(log_dir: Option<&Path>, session_id: &str) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let session_log_dir = dir.join(session_id);
            std::fs::create_dir_all(&session_log_dir)?;

            let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(session = %session_id, "logging initialized");
    if let Some(dir) = log_dir {
        tracing::info!("log file: {}/client.log", dir.join(session_id).display());
    }

    Ok(guard)
}
