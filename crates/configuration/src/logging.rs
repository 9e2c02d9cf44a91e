use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Logs always go to stderr so that stdout stays clean for the summary table.
/// When a log file is configured a second, non-ANSI layer writes to it; the
/// returned guard must be held until exit so buffered lines are flushed.
pub fn init(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = build_filter(env_directives.as_deref(), &settings.level)?;

    let (file_layer, guard) = match &settings.file {
        Some(path) => {
            let file_name = path.file_name().ok_or_else(|| {
                ConfigError::ValidationError(format!("logging.file has no file name: {}", path.display()))
            })?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339())
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    if let Some(reason) = rejected {
        tracing::warn!(
            env = EnvFilter::DEFAULT_ENV,
            %reason,
            level = %settings.level,
            "ignoring malformed log filter, using configured level"
        );
    }
    if let Some(path) = &settings.file {
        tracing::debug!(file = %path.display(), "file logging enabled");
    }

    Ok(guard)
}

/// Prefers the `RUST_LOG` directives when they parse, otherwise falls back to
/// the configured level. The second value carries the parse error of directives
/// that were present but rejected.
fn build_filter(
    env_directives: Option<&str>,
    level: &str,
) -> Result<(EnvFilter, Option<String>), ConfigError> {
    let rejected = match env_directives.map(EnvFilter::try_new) {
        Some(Ok(filter)) => return Ok((filter, None)),
        Some(Err(e)) => Some(e.to_string()),
        None => None,
    };

    let filter = EnvFilter::try_new(level)
        .map_err(|e| ConfigError::ValidationError(format!("logging.level: {e}")))?;
    Ok((filter, rejected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_env_directives_win() {
        let (filter, rejected) = build_filter(Some("debug"), "info").unwrap();
        assert_eq!(filter.to_string(), "debug");
        assert!(rejected.is_none());
    }

    #[test]
    fn absent_env_uses_configured_level() {
        let (filter, rejected) = build_filter(None, "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");
        assert!(rejected.is_none());
    }

    #[test]
    fn malformed_env_directives_are_reported() {
        let (filter, rejected) = build_filter(Some("ingest=loudest"), "info").unwrap();
        assert_eq!(filter.to_string(), "info");
        assert!(rejected.is_some());
    }

    #[test]
    fn malformed_configured_level_is_an_error() {
        let err = build_filter(None, "ingest=loudest").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(m) if m.starts_with("logging.level")));
    }
}
