use anyhow::{Context, Result};
use numtap_core::LogConfig;
use std::fs::File;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Keeps the file writer thread alive
pub struct LogGuard {
    _guard: WorkerGuard,
}

fn filter(config: &LogConfig) -> EnvFilter {
    // RUST_LOG wins over the configured level
    EnvFilter::builder()
        .with_default_directive(config.parse_level().into())
        .from_env_lossy()
}

/// Install the global subscriber.
///
/// Console logs go to stderr so stdout stays free for the game view.
pub fn init(config: &LogConfig) -> Result<Option<LogGuard>> {
    if config.file_output {
        config
            .ensure_log_directory()
            .context("Failed to create log directory")?;

        if let Err(e) = config.cleanup_old_logs() {
            eprintln!("Warning: Failed to clean up old log files: {}", e);
        }
    }

    let console_layer = config.console_output.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
            .with_filter(filter(config))
    });

    let (file_layer, guard) = if config.file_output {
        let log_path = config.current_log_path();
        let file = File::options()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {:?}", log_path))?;
        let (writer, worker_guard) = tracing_appender::non_blocking(file);

        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter(config));

        (
            Some(layer),
            Some(LogGuard {
                _guard: worker_guard,
            }),
        )
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!("Logging initialized at level: {}", config.level);
    if config.file_output {
        tracing::info!("Log file path: {:?}", config.current_log_path());
    }

    Ok(guard)
}
