//! Severity and output format settings.

use std::fmt;

use tracing_subscriber::filter::LevelFilter;

/// Minimum severity of emitted log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Per-command and per-match detail.
    Debug,
    /// Recovery start/finish and lifecycle transitions.
    #[default]
    Info,
    /// Configuration concerns such as an empty range list.
    Warn,
    /// Failed checks and failed recovery commands.
    Error,
}

impl LogLevel {
    /// Parses a level name, case-insensitively.
    ///
    /// Accepts `debug`, `info`, `warn` (or `warning`) and `error`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns the equivalent `tracing` filter.
    #[must_use]
    pub const fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Shape of each emitted log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable single-line text.
    Text,
}

impl LogFormat {
    /// Parses a format name, case-insensitively (`json` or `text`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Text => f.write_str("text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(LogLevel::from_name("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_name("Info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_name("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_name("error"), Some(LogLevel::Error));
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert_eq!(LogLevel::from_name("trace"), None);
        assert_eq!(LogLevel::from_name(""), None);
    }

    #[test]
    fn default_level_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn level_maps_to_filter() {
        assert_eq!(LogLevel::Warn.as_level_filter(), LevelFilter::WARN);
    }

    #[test]
    fn display_round_trips() {
        for level in [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert_eq!(LogLevel::from_name(&level.to_string()), Some(level));
        }
    }

    #[test]
    fn format_names() {
        assert_eq!(LogFormat::from_name("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::from_name("text"), Some(LogFormat::Text));
        assert_eq!(LogFormat::from_name("yaml"), None);
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }
}
