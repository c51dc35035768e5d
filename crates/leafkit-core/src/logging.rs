#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! This module provides re-exports of tracing macros when the `tracing` feature is enabled.
//! When the feature is disabled, no-op macros are provided for compatibility.
//!
//! With `tracing-json`, [`init_subscriber`] installs a formatted subscriber
//! configured from [`LogConfig`].

use std::fmt;

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable holding the filter directive (e.g. `leafkit_core=trace`).
pub const ENV_LOG_FILTER: &str = "LEAFKIT_LOG";
/// Environment variable selecting the output format (`json` or `compact`).
pub const ENV_LOG_FORMAT: &str = "LEAFKIT_LOG_FORMAT";

const DEFAULT_FILTER: &str = "warn";

// When tracing is not enabled, provide no-op macros
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op error macro when tracing is disabled.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// No-op error_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! error_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op info macro when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op info_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op trace_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op warn_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// A no-op span guard for when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the no-op span (does nothing).
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// A no-op span guard.
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;

/// Output format for the installed subscriber.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Single-line human-readable output.
    Compact,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "compact" | "text" | "pretty" => Some(Self::Compact),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read configuration using a custom environment lookup (for tests).
    ///
    /// Blank filters and unknown formats fall back to the defaults.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = get_env(ENV_LOG_FILTER)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let format = get_env(ENV_LOG_FORMAT)
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        Self { filter, format }
    }
}

/// Failure to install the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogInitError {
    /// The filter directive did not parse.
    Filter(String),
    /// A global subscriber is already installed.
    AlreadySet(String),
}

impl fmt::Display for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadySet(msg) => write!(f, "subscriber already set: {msg}"),
        }
    }
}

impl std::error::Error for LogInitError {}

/// Install a global `tracing-subscriber` fmt subscriber.
///
/// # Errors
///
/// Returns [`LogInitError::Filter`] for a bad directive and
/// [`LogInitError::AlreadySet`] when another subscriber won the race.
#[cfg(feature = "tracing-json")]
pub fn init_subscriber(config: &LogConfig) -> Result<(), LogInitError> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_new(&config.filter).map_err(|e| LogInitError::Filter(e.to_string()))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|e| LogInitError::AlreadySet(e.to_string()))
}
