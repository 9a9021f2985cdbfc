use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing.
///
/// - stdout: human logs.
/// - file: `<log_dir>/<service>.jsonl`, hourly rolling.
/// - env: RUST_LOG controls level (e.g. `info,cookie_reader=debug`).
///
/// The file writer's guard is parked in a static so buffered lines survive
/// until process exit.
pub fn init_tracing(service: &str, log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::hourly(log_dir, format!("{service}.jsonl"));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let _ = TRACING_GUARD.set(guard);

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(true);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stdout_layer)
        .with(json_layer)
        .try_init()?;

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
