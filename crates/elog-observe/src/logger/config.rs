use std::io::IsTerminal;

use serde::Deserialize;

use crate::logger::{
    error::LoggerError, format::LoggerFormat, level::LoggerLevel, output::LogOutput,
};

pub const ENV_LEVEL: &str = "ELOG_LEVEL";
pub const ENV_FORMAT: &str = "ELOG_FORMAT";
pub const ENV_OUTPUT: &str = "ELOG_OUTPUT";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    pub output: LogOutput,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::Info,
            output: LogOutput::Stderr,
            with_targets: true,
            use_color: std::io::stderr().is_terminal(),
        }
    }
}

impl LoggerConfig {
    /// Defaults overlaid with `ELOG_LEVEL`, `ELOG_FORMAT` and `ELOG_OUTPUT`.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, LoggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(level) = lookup(ENV_LEVEL) {
            cfg.level = level.parse()?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            cfg.format = format.parse()?;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            cfg.output = output.parse()?;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use super::*;

    #[test]
    fn defaults_match_text_stderr_info() {
        let cfg = LoggerConfig::default();
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level, LoggerLevel::Info);
        assert!(matches!(cfg.output, LogOutput::Stderr));
        assert!(cfg.with_targets);
    }

    #[test]
    fn deserializes_partial_config() {
        let cfg: LoggerConfig =
            serde_json::from_str(r#"{ "format": "json", "level": "Warn" }"#).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level, LoggerLevel::Warn);
        assert!(matches!(cfg.output, LogOutput::Stderr));
    }

    #[test]
    fn deserialize_rejects_bad_level() {
        let res = serde_json::from_str::<LoggerConfig>(r#"{ "level": "loud" }"#);
        assert!(res.is_err());
    }

    #[test]
    fn env_overlay_applies_each_variable() {
        let vars: HashMap<&str, &str> = [
            (ENV_LEVEL, "debug"),
            (ENV_FORMAT, "JSON"),
            (ENV_OUTPUT, "/tmp/elog/app.log"),
        ]
        .into_iter()
        .collect();

        let cfg = LoggerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.level, LoggerLevel::Debug);
        assert_eq!(cfg.format, LoggerFormat::Json);
        match cfg.output {
            LogOutput::File(p) => assert_eq!(p, PathBuf::from("/tmp/elog/app.log")),
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[test]
    fn env_overlay_reports_malformed_values() {
        let err = LoggerConfig::from_lookup(|k| (k == ENV_FORMAT).then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidFormat(_)));
    }
}
