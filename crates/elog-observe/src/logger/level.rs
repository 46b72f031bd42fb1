use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::logger::error::LoggerError;

/// Record severity, most severe first.
///
/// Ordering follows verbosity: `Panic < Fatal < Error < ... < Trace`.
/// A record at level `L` passes an engine set to `C` when `L <= C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum LoggerLevel {
    /// Logs, then panics with the record message.
    Panic = 0,
    /// Logs, then exits the process with status 1.
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl LoggerLevel {
    pub const ALL: [LoggerLevel; 7] = [
        LoggerLevel::Panic,
        LoggerLevel::Fatal,
        LoggerLevel::Error,
        LoggerLevel::Warn,
        LoggerLevel::Info,
        LoggerLevel::Debug,
        LoggerLevel::Trace,
    ];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            LoggerLevel::Panic => "panic",
            LoggerLevel::Fatal => "fatal",
            LoggerLevel::Error => "error",
            LoggerLevel::Warn => "warn",
            LoggerLevel::Info => "info",
            LoggerLevel::Debug => "debug",
            LoggerLevel::Trace => "trace",
        }
    }

    #[inline]
    pub(crate) fn from_u8(v: u8) -> Self {
        Self::ALL
            .get(v as usize)
            .copied()
            .unwrap_or(LoggerLevel::Trace)
    }

    /// Level of an event produced by the `tracing` macros.
    #[inline]
    pub fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => LoggerLevel::Error,
            tracing::Level::WARN => LoggerLevel::Warn,
            tracing::Level::INFO => LoggerLevel::Info,
            tracing::Level::DEBUG => LoggerLevel::Debug,
            _ => LoggerLevel::Trace,
        }
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "panic" => Ok(LoggerLevel::Panic),
            "fatal" => Ok(LoggerLevel::Fatal),
            "error" => Ok(LoggerLevel::Error),
            "warn" | "warning" => Ok(LoggerLevel::Warn),
            "info" => Ok(LoggerLevel::Info),
            "debug" => Ok(LoggerLevel::Debug),
            "trace" => Ok(LoggerLevel::Trace),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, LoggerError> {
        s.parse()
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
