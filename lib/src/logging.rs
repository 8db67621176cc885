//! Tracing subscriber setup for the `scoreprep` binary.
//!
//! Console output goes to stderr, filtered by `RUST_LOG` when set and by
//! [`LoggingConfig::level`] otherwise. When a log directory is configured,
//! every event at `debug` and above is also written as JSON lines to
//! `<log_dir>/<MM_DD_YYYY_HH_MM_SS>.log`.

use crate::config::LoggingConfig;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name for a log file created now.
pub fn log_file_name() -> String {
    chrono::Local::now().format("%m_%d_%Y_%H_%M_%S.log").to_string()
}

/// Install the global subscriber.
///
/// Returns the file writer's guard; keep it alive until exit so buffered
/// lines are flushed. Returns `Ok(None)` when file logging is disabled.
pub fn init_logging(config: &LoggingConfig) -> io::Result<Option<WorkerGuard>> {
    let (file, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, log_file_name());
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_filter(console_filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
            .with_filter(console_filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(file)
        .with(console)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(guard)
}
