//! File-based tracing setup.
//!
//! The dashboard owns the terminal, so log output goes to a rolling file
//! under ${SHELF_HOME}/logs instead of stderr. Filtering follows SHELF_LOG
//! (env-filter syntax), defaulting to "info".

use shelf_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber.
///
/// The returned guard must stay alive for the duration of the process so
/// buffered log lines are flushed on exit.
pub fn init() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env("SHELF_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::daily(paths::logs_dir(), "shelf.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    installed.is_ok().then_some(guard)
}
