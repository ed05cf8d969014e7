//! File logging for the terminal client.
//!
//! The TUI owns stdout, so logs go to a per-session file under the platform
//! cache directory (`~/.cache/vivi/logs` on Linux).
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Platform log directory, falling back to `/tmp/vivi/logs`.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "vivi")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/vivi"))
        .join("logs")
}

/// Installs the global subscriber writing to `<log_dir>/<session_id>.log`.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// whole program. Filtering follows `RUST_LOG` and defaults to `info`.
pub fn setup_logging(session_id: &str) -> Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, format!("{session_id}.log"));
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
