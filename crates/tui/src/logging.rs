use crate::config::AdboardConfig;
use crate::error::AppError;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "adboard.log";

/// Installs a file-backed subscriber. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr.
///
/// The returned guard flushes buffered lines on drop and must live until exit.
pub fn init(config: &AdboardConfig) -> Result<Option<WorkerGuard>, AppError> {
    if !config.logging_enabled {
        return Ok(None);
    }

    let log_dir = config.resolved_log_dir();
    std::fs::create_dir_all(&log_dir).map_err(|source| AppError::LogDir {
        path: log_dir.clone(),
        source,
    })?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|error| AppError::Logging(format!("invalid log filter: {error}")))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))?;

    Ok(Some(guard))
}
