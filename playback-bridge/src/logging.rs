//! Logging setup for hosts without their own subscriber
//!
//! The bridge only emits `tracing` events. Embedders that already install a
//! subscriber should ignore this module; everyone else can call
//! [`init_logging_from_env`] once at startup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const MODE_VAR: &str = "PLAYBACK_BRIDGE_LOG_MODE";
const LEVEL_VAR: &str = "PLAYBACK_BRIDGE_LOG_LEVEL";

/// How much the bridge should print, and in what shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// Install nothing
    Silent,
    /// Compact single-line output at `info`
    Development,
    /// Multi-line output at `debug` with thread ids and source locations
    Debug,
    /// One JSON object per line, for log shippers
    Json,
}

impl LoggingMode {
    fn default_directive(self) -> &'static str {
        match self {
            LoggingMode::Silent => "off",
            LoggingMode::Development | LoggingMode::Json => "info",
            LoggingMode::Debug => "debug",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("A global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(String),

    #[error("Bad filter directive in {var}: {reason}")]
    BadDirective { var: &'static str, reason: String },
}

/// Install a global subscriber for `mode`
///
/// The filter comes from `PLAYBACK_BRIDGE_LOG_LEVEL`, then `RUST_LOG`, then
/// the mode's own level. Fails if another subscriber got there first.
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    if mode == LoggingMode::Silent {
        return Ok(());
    }

    let filter = resolve_filter(mode.default_directive())?;
    let registry = Registry::default().with(filter);

    let installed = match mode {
        LoggingMode::Development => registry
            .with(fmt::layer().compact().with_target(false))
            .try_init(),
        LoggingMode::Debug => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LoggingMode::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LoggingMode::Silent => Ok(()),
    };

    installed.map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))
}

/// [`init_logging`] with the mode read from `PLAYBACK_BRIDGE_LOG_MODE`
///
/// Accepts `development`, `debug` or `json`, case-insensitively. Anything
/// else, including an unset variable, means silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let value = std::env::var(MODE_VAR).ok();
    init_logging(parse_mode(value.as_deref()))
}

fn parse_mode(value: Option<&str>) -> LoggingMode {
    let Some(value) = value else {
        return LoggingMode::Silent;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => LoggingMode::Development,
        "debug" => LoggingMode::Debug,
        "json" => LoggingMode::Json,
        _ => LoggingMode::Silent,
    }
}

fn resolve_filter(fallback: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(directive) = std::env::var(LEVEL_VAR) {
        return EnvFilter::try_new(&directive).map_err(|e| LoggingError::BadDirective {
            var: LEVEL_VAR,
            reason: e.to_string(),
        });
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
}

/// Whether any global subscriber is installed, ours or the host's
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_installs_nothing() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
    }

    #[test]
    fn parse_mode_is_lenient() {
        assert_eq!(parse_mode(Some("development")), LoggingMode::Development);
        assert_eq!(parse_mode(Some(" Dev ")), LoggingMode::Development);
        assert_eq!(parse_mode(Some("DEBUG")), LoggingMode::Debug);
        assert_eq!(parse_mode(Some("json")), LoggingMode::Json);
        assert_eq!(parse_mode(Some("loud")), LoggingMode::Silent);
        assert_eq!(parse_mode(None), LoggingMode::Silent);
    }

    #[test]
    fn default_directive_per_mode() {
        assert_eq!(LoggingMode::Development.default_directive(), "info");
        assert_eq!(LoggingMode::Json.default_directive(), "info");
        assert_eq!(LoggingMode::Debug.default_directive(), "debug");
    }
}
