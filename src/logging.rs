use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Routes `tracing` output to a daily file under `dir`. The terminal is owned
/// by the TUI, so nothing is written to stdout or stderr. `RUST_LOG` beats the
/// configured level. Keep the guard alive until exit or buffered lines are lost.
pub fn init(dir: &Path, level: &str) -> Result<WorkerGuard> {
    fs::create_dir_all(dir).with_context(|| format!("creating log directory {:?}", dir))?;
    let file_appender = tracing_appender::rolling::daily(dir, "reminders.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("reminders={}", level)))
        .context("building log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_line_number(true)
                .with_ansi(false),
        )
        .try_init()
        .context("installing log subscriber")?;
    Ok(guard)
}
