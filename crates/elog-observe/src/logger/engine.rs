use std::fmt::Display;

use crate::logger::{
    error::LoggerError, format::LoggerFormat, level::LoggerLevel, output::LogOutput,
};

/// A structured field attached to a record.
pub type Field<'a> = (&'a str, &'a dyn Display);

/// Capabilities an error logger needs from its logging backend.
///
/// Implementations must tolerate concurrent calls from any thread.
pub trait LoggingEngine: Send + Sync {
    /// Emit `message` at `level` with optional structured `fields`.
    ///
    /// Records below the configured level are dropped.
    /// `Panic` and `Fatal` carry the backend's termination semantics.
    ///
    /// Fields may be rendered as one `key=value` string rather than as
    /// separate keys; `TracingEngine` emits them under a single `fields`
    /// entry. Use `TracingEngine::in_scope` with the `tracing` macros when
    /// each field must stay a distinct key.
    fn record(&self, level: LoggerLevel, message: &dyn Display, fields: &[Field<'_>]);

    fn set_level(&self, level: LoggerLevel);

    fn level(&self) -> LoggerLevel;

    #[inline]
    fn is_level_enabled(&self, level: LoggerLevel) -> bool {
        level <= self.level()
    }

    fn set_formatter(&self, format: LoggerFormat);

    fn formatter(&self) -> LoggerFormat;

    /// Redirect output. On failure the previous output stays active.
    fn set_output(&self, output: LogOutput) -> Result<(), LoggerError>;
}
