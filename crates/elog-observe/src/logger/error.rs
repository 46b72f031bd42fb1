use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid logger format: {0} (expected: text|json)")]
    InvalidFormat(String),
    #[error("Invalid log level: {0} (expected: panic|fatal|error|warn|info|debug|trace)")]
    InvalidLevel(String),
    #[error("Invalid log output: {0}")]
    InvalidWriter(String),
    #[error("Logger has been already initialized")]
    AlreadyInitialized,
}
