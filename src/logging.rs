use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

/// Installs the global subscriber with a rolling daily log file.
///
/// Called once by the embedding application. The returned guard must be
/// held for the lifetime of the process or buffered lines are lost.
pub fn init_logging(log_dir: &str) -> WorkerGuard {
    let file_appender = rolling::daily(log_dir, "timekeeper.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    guard
}
