//! Logging configuration.
//!
//! The crates log through `tracing`.  [`init_logging`] installs a
//! `tracing-subscriber` formatter filtered by a [`LogConfig`].

use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::error::LogError;

/// Minimum level that is written.  `None` silences everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    None,
}

impl LogLevel {
    fn directive(self) -> Option<&'static str> {
        match self {
            LogLevel::Debug => Some("debug"),
            LogLevel::Info => Some("info"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Error => Some("error"),
            LogLevel::None => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive().unwrap_or("none"))
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "none" | "off" => Ok(LogLevel::None),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

/// Subscriber settings.
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: LogLevel,
    pub enabled: bool,
    pub show_timestamp: bool,
    /// Print the module path of each event.
    pub show_target: bool,
    /// Extra `EnvFilter` directives appended after the level, e.g.
    /// `"viewless_core::render=trace"`.
    pub directives: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            enabled: true,
            show_timestamp: true,
            show_target: true,
            directives: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    pub fn with_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// The filter this config installs, or `None` when logging is off.
    pub fn env_filter(&self) -> Result<Option<EnvFilter>, LogError> {
        if !self.enabled {
            return Ok(None);
        }
        let Some(level) = self.level.directive() else {
            return Ok(None);
        };
        let directive = match &self.directives {
            Some(extra) if !extra.trim().is_empty() => format!("{level},{extra}"),
            _ => level.to_string(),
        };
        EnvFilter::try_new(&directive)
            .map(Some)
            .map_err(|source| LogError::InvalidFilter { directive, source })
    }
}

/// Install a global `fmt` subscriber for `config`.
///
/// Returns `Ok(false)` without installing anything when the config turns
/// logging off.
pub fn init_logging(config: &LogConfig) -> Result<bool, LogError> {
    let Some(filter) = config.env_filter()? else {
        return Ok(false);
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target);
    let installed = if config.show_timestamp {
        builder.try_init()
    } else {
        builder.without_time().try_init()
    };
    installed.map_err(|_| LogError::AlreadyInstalled)?;
    Ok(true)
}
