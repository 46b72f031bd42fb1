use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::logger::error::LoggerError;

/// Output encoding of log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LoggerFormat {
    #[default]
    Text,
    Json,
}

impl LoggerFormat {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            LoggerFormat::Text => 0,
            LoggerFormat::Json => 1,
        }
    }

    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            1 => LoggerFormat::Json,
            _ => LoggerFormat::Text,
        }
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "text" => Ok(LoggerFormat::Text),
            "json" => Ok(LoggerFormat::Json),
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for LoggerFormat {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerFormat::Text => f.write_str("text"),
            LoggerFormat::Json => f.write_str("json"),
        }
    }
}
