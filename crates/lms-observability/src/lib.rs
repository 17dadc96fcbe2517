//! # LMS Observability
//!
//! Logging setup for the LMS admin tools.
//!
//! Console output goes to stderr so it never interleaves with the interactive
//! prompts on stdout. When a log directory is configured, structured JSON
//! logs are also written to a daily-rolling file there.
//!
//! # Example
//!
//! ```ignore
//! use lms_config::LoggingConfig;
//!
//! let _guard = lms_observability::init_logging(&LoggingConfig::from_env());
//! tracing::info!("ready");
//! ```

use lms_config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the console filter: `RUST_LOG` wins, otherwise the configured level
/// with noisy dependencies held at `warn`.
pub fn console_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", level)))
}

/// Installs the global tracing subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process. Returns `None` when file logging is disabled.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter(&config.level));

    let (json_layer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "lms-admin.json");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("⚠️  Logging already initialized: {}", e);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_filter_accepts_configured_level() {
        let filter = console_filter("debug");
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_default_filter_quiets_sqlx_only() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = console_filter("info").to_string();
        assert!(filter.contains("sqlx=warn"));
        assert!(!filter.contains("hyper"));
    }
}
