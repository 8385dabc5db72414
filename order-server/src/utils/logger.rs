//! Logging infrastructure
//!
//! Structured logging setup. The filter comes from `RUST_LOG` when set,
//! otherwise from the configured default level. With a log directory the
//! output also goes to a daily-rolling file.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// `log_dir` is used only if the directory already exists; the console
/// remains the sink otherwise.
pub fn init_logger(default_level: &str, log_dir: Option<&Path>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(dir) = log_dir
        && dir.exists()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "order-server");
        builder.with_writer(file_appender).with_ansi(false).init();
        return;
    }

    builder.init();
}
